//! # Order Book
//!
//! In-memory registry of customers, products and orders, keyed by id.
//!
//! ## Order Entry Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_order("C-1", "SKU-9", 2)                                        │
//! │       │                                                                 │
//! │       ├── customer "C-1" registered?  no ──► CustomerNotFound           │
//! │       ├── product "SKU-9" registered? no ──► ProductNotFound            │
//! │       ├── quantity > 0?               no ──► NonPositiveQuantity        │
//! │       ▼                                                                 │
//! │  build_order: Order::unregistered(customer, [OrderItem(product, 2)])    │
//! │       │   (callers may persist the order here)                          │
//! │       ▼                                                                 │
//! │  place_order: Order::register + book.orders.push(order)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::customer::Customer;
use crate::error::{CoreError, CoreResult};
use crate::order::{Order, OrderItem};
use crate::product::Product;

/// Customers, products and orders known to the application.
///
/// Listing methods return entries in insertion order.
#[derive(Debug, Default)]
pub struct OrderBook {
    customers: Vec<Rc<Customer>>,
    customer_index: HashMap<String, usize>,
    products: Vec<Rc<Product>>,
    product_index: HashMap<String, usize>,
    orders: Vec<Rc<Order>>,
}

impl OrderBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customer. A customer with the same id is replaced.
    pub fn add_customer(&mut self, customer: Customer) -> Rc<Customer> {
        let customer = Rc::new(customer);
        let id = customer.customer_id().to_string();
        match self.customer_index.get(&id) {
            Some(&slot) => self.customers[slot] = Rc::clone(&customer),
            None => {
                self.customer_index.insert(id, self.customers.len());
                self.customers.push(Rc::clone(&customer));
            }
        }
        customer
    }

    /// Registers a product. A product with the same SKU is replaced.
    pub fn add_product(&mut self, product: Product) -> Rc<Product> {
        let product = Rc::new(product);
        let sku = product.sku().to_string();
        match self.product_index.get(&sku) {
            Some(&slot) => self.products[slot] = Rc::clone(&product),
            None => {
                self.product_index.insert(sku, self.products.len());
                self.products.push(Rc::clone(&product));
            }
        }
        product
    }

    pub fn customer(&self, customer_id: &str) -> Option<&Rc<Customer>> {
        self.customer_index
            .get(customer_id)
            .map(|&slot| &self.customers[slot])
    }

    pub fn product(&self, sku: &str) -> Option<&Rc<Product>> {
        self.product_index.get(sku).map(|&slot| &self.products[slot])
    }

    /// Looks an order up by id.
    pub fn order(&self, order_id: &str) -> CoreResult<&Rc<Order>> {
        self.orders
            .iter()
            .find(|o| o.order_id() == order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))
    }

    pub fn customers(&self) -> &[Rc<Customer>] {
        &self.customers
    }

    pub fn products(&self) -> &[Rc<Product>] {
        &self.products
    }

    pub fn orders(&self) -> &[Rc<Order>] {
        &self.orders
    }

    /// Places a one-item order for a registered customer and product.
    pub fn create_order(
        &mut self,
        customer_id: &str,
        sku: &str,
        quantity: i64,
        created_at: Option<DateTime<Utc>>,
    ) -> CoreResult<Rc<Order>> {
        let order = self.build_order(customer_id, sku, quantity, created_at)?;
        self.place_order(Rc::clone(&order));
        Ok(order)
    }

    /// Builds a one-item order without touching the book or the customer.
    ///
    /// Hand the result to [`place_order`](Self::place_order) once it has
    /// been stored.
    pub fn build_order(
        &self,
        customer_id: &str,
        sku: &str,
        quantity: i64,
        created_at: Option<DateTime<Utc>>,
    ) -> CoreResult<Rc<Order>> {
        let customer = self
            .customer(customer_id)
            .cloned()
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;
        let product = self
            .product(sku)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))?;

        let item = OrderItem::new(product, quantity)?;
        Ok(Order::unregistered(&customer, vec![item], created_at, None))
    }

    /// Registers a built order with its customer and records it.
    pub fn place_order(&mut self, order: Rc<Order>) {
        Order::register(&order);
        debug!(
            order_id = %order.order_id(),
            customer_id = %order.customer_id(),
            total = order.total_cost(),
            "Order placed"
        );
        self.orders.push(order);
    }

    /// Records an order that was built elsewhere (e.g. loaded from storage).
    pub fn insert_order(&mut self, order: Rc<Order>) {
        self.orders.push(order);
    }
}
