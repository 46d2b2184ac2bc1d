//! # Orders
//!
//! Order items and the orders that group them.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Rc<Customer> ──── orders: Vec<Rc<Order>> ───┐                          │
//! │       ▲                                      ▼                          │
//! │       └──────── customer: Weak<Customer> ── Order                       │
//! │                                              │ items (owned)            │
//! │                                              ▼                          │
//! │                                          OrderItem ── Rc<Product>       │
//! │                                                        (shared)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The customer owns its orders; the order points back weakly so the pair
//! never forms a reference cycle.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::customer::{Contactable, Customer};
use crate::id::id_or_generate;
use crate::product::Product;
use crate::validation::{validate_quantity, ValidationResult};

// =============================================================================
// Order Item
// =============================================================================

/// A product and how many of it were ordered.
#[derive(Debug, Clone)]
pub struct OrderItem {
    product: Rc<Product>,
    quantity: i64,
}

impl OrderItem {
    /// Creates an item. Fails with `NonPositiveQuantity` when `quantity <= 0`.
    pub fn new(product: Rc<Product>, quantity: i64) -> ValidationResult<Self> {
        validate_quantity(quantity)?;
        Ok(OrderItem { product, quantity })
    }

    /// The ordered product.
    pub fn product(&self) -> &Rc<Product> {
        &self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `price × quantity`, computed from the product on every call.
    pub fn cost(&self) -> f64 {
        self.product.price() * self.quantity as f64
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed by exactly one customer.
#[derive(Debug)]
pub struct Order {
    order_id: String,
    customer_id: String,
    customer: Weak<Customer>,
    items: RefCell<Vec<OrderItem>>,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order and registers it with `customer`.
    ///
    /// Construction never fails. If the customer refuses the registration
    /// the failure is logged and the order is still returned; the customer's
    /// order list then lacks it.
    ///
    /// ## Example
    /// ```rust
    /// use std::rc::Rc;
    /// use order_core::{Customer, Order, OrderItem, Product};
    ///
    /// let ann = Rc::new(Customer::new("Ann", None, None, None, None).unwrap());
    /// let widget = Rc::new(Product::new("Widget", 10.0, None).unwrap());
    /// let item = OrderItem::new(widget, 2).unwrap();
    ///
    /// let order = Order::new(&ann, vec![item], None, None);
    /// assert_eq!(order.total_cost(), 20.0);
    /// assert!(Rc::ptr_eq(&ann.orders()[0], &order));
    /// ```
    pub fn new(
        customer: &Rc<Customer>,
        items: Vec<OrderItem>,
        created_at: Option<DateTime<Utc>>,
        order_id: Option<String>,
    ) -> Rc<Order> {
        let order = Order::unregistered(customer, items, created_at, order_id);
        Order::register(&order);
        order
    }

    /// Creates an order that the customer does not know about yet.
    ///
    /// Nothing counts it until [`Order::register`] is called, so it can be
    /// stored first and dropped if storing fails.
    pub fn unregistered(
        customer: &Rc<Customer>,
        items: Vec<OrderItem>,
        created_at: Option<DateTime<Utc>>,
        order_id: Option<String>,
    ) -> Rc<Order> {
        Rc::new(Order {
            order_id: id_or_generate(order_id),
            customer_id: customer.customer_id().to_string(),
            customer: Rc::downgrade(customer),
            items: RefCell::new(items),
            created_at: created_at.unwrap_or_else(Utc::now),
        })
    }

    /// Adds `order` to its customer's order list.
    ///
    /// A refusal, or a customer that no longer exists, is logged and
    /// otherwise ignored.
    pub fn register(order: &Rc<Order>) {
        let Some(customer) = order.customer() else {
            warn!(order_id = %order.order_id, "Order has no live customer, not registered");
            return;
        };

        if let Err(err) = customer.add_order(Rc::clone(order)) {
            warn!(
                order_id = %order.order_id,
                customer_id = %order.customer_id,
                error = %err,
                "Order registration failed, continuing"
            );
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Id of the customer who placed the order.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// The customer, while anything else still holds it.
    pub fn customer(&self) -> Option<Rc<Customer>> {
        self.customer.upgrade()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Appends an item.
    pub fn add_item(&self, item: OrderItem) {
        self.items.borrow_mut().push(item);
    }

    /// Copy of the items.
    pub fn items(&self) -> Vec<OrderItem> {
        self.items.borrow().clone()
    }

    pub fn item_count(&self) -> usize {
        self.items.borrow().len()
    }

    /// Sum of item costs; `0.0` for an empty order.
    pub fn total_cost(&self) -> f64 {
        self.items.borrow().iter().map(OrderItem::cost).sum()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer = self
            .customer()
            .map(|c| c.name())
            .unwrap_or_else(|| self.customer_id.clone());
        write!(
            f,
            "Order(id={}, customer={}, items={}, total={:.2})",
            self.order_id,
            customer,
            self.item_count(),
            self.total_cost()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::error::ValidationError;

    fn customer() -> Rc<Customer> {
        Rc::new(
            Customer::new(
                "Ann",
                Some("a@example.com".to_string()),
                Some("+1234567890".to_string()),
                None,
                Some("C-1".to_string()),
            )
            .unwrap(),
        )
    }

    fn product(price: f64) -> Rc<Product> {
        Rc::new(Product::new("Widget", price, None).unwrap())
    }

    #[test]
    fn test_item_quantity_must_be_positive() {
        assert_eq!(
            OrderItem::new(product(1.0), 0).unwrap_err(),
            ValidationError::NonPositiveQuantity { quantity: 0 }
        );
        assert!(OrderItem::new(product(1.0), -5).is_err());
    }

    #[test]
    fn test_item_cost() {
        let item = OrderItem::new(product(2.5), 4).unwrap();
        assert_eq!(item.cost(), 10.0);
    }

    #[test]
    fn test_order_registers_with_customer() {
        let ann = customer();
        let item = OrderItem::new(product(10.0), 2).unwrap();
        let order = Order::new(&ann, vec![item], None, None);

        assert_eq!(order.total_cost(), 20.0);
        let orders = ann.orders();
        assert_eq!(orders.len(), 1);
        assert!(Rc::ptr_eq(&orders[0], &order));
        assert_eq!(order.customer_id(), "C-1");
        assert!(Rc::ptr_eq(&order.customer().unwrap(), &ann));
    }

    #[test]
    fn test_empty_order_totals_zero() {
        let order = Order::new(&customer(), Vec::new(), None, None);
        assert_eq!(order.total_cost(), 0.0);
        assert_eq!(order.order_id().len(), 32);
    }

    #[test]
    fn test_items_is_a_copy() {
        let order = Order::new(&customer(), Vec::new(), None, None);
        let mut items = order.items();
        items.push(OrderItem::new(product(1.0), 1).unwrap());
        assert_eq!(order.item_count(), 0);

        order.add_item(OrderItem::new(product(3.0), 1).unwrap());
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total_cost(), 3.0);
    }

    #[test]
    fn test_created_at_supplied_or_now() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let order = Order::new(&customer(), Vec::new(), Some(at), Some("O-1".to_string()));
        assert_eq!(order.created_at(), at);
        assert_eq!(order.order_id(), "O-1");

        let before = Utc::now();
        let order = Order::new(&customer(), Vec::new(), None, None);
        assert!(order.created_at() >= before);
    }

    #[test]
    fn test_total_spent_over_orders() {
        let ann = customer();
        Order::new(&ann, vec![OrderItem::new(product(5.0), 1).unwrap()], None, None);
        Order::new(&ann, vec![OrderItem::new(product(2.5), 3).unwrap()], None, None);
        assert_eq!(ann.total_spent(), 12.5);
        assert!(ann.contact_summary().starts_with("Ann (C-1) — orders: 2 — "));
    }

    #[test]
    fn test_shared_product_between_items() {
        let widget = product(4.0);
        let a = OrderItem::new(Rc::clone(&widget), 1).unwrap();
        let b = OrderItem::new(Rc::clone(&widget), 2).unwrap();
        assert!(Rc::ptr_eq(a.product(), b.product()));
        assert_eq!(Rc::strong_count(&widget), 3);
    }

    #[test]
    fn test_unregistered_until_registered() {
        let ann = customer();
        let item = OrderItem::new(product(4.0), 2).unwrap();
        let order = Order::unregistered(&ann, vec![item], None, Some("O-7".to_string()));

        assert_eq!(order.total_cost(), 8.0);
        assert_eq!(ann.order_count(), 0);
        assert_eq!(ann.total_spent(), 0.0);

        Order::register(&order);
        assert!(Rc::ptr_eq(&ann.orders()[0], &order));
        assert_eq!(ann.total_spent(), 8.0);
    }

    #[test]
    fn test_display() {
        let ann = customer();
        let order = Order::new(
            &ann,
            vec![OrderItem::new(product(1.5), 2).unwrap()],
            None,
            Some("O-9".to_string()),
        );
        assert_eq!(
            order.to_string(),
            "Order(id=O-9, customer=Ann, items=1, total=3.00)"
        );

        drop(ann);
        assert!(order.customer().is_none());
        assert_eq!(
            order.to_string(),
            "Order(id=O-9, customer=C-1, items=1, total=3.00)"
        );
    }
}
