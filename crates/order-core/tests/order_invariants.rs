//! Property tests for the entity invariants and the order sort.

use std::rc::Rc;

use chrono::{TimeZone, Utc};
use order_core::{
    sort_orders, sort_orders_by_date, Contactable, Customer, Order, OrderBook, OrderItem, Product,
    ValidationError,
};
use proptest::prelude::*;

fn labelled(keys: &[i32]) -> Vec<(i32, usize)> {
    keys.iter().copied().zip(0..).collect()
}

proptest! {
    /// A negative price never yields a product.
    #[test]
    fn prop_negative_price_rejected(price in -1.0e9f64..-1.0e-9) {
        let result = Product::new("Widget", price, None);
        prop_assert!(
            matches!(result, Err(ValidationError::NegativePrice { .. })),
            "price {} accepted",
            price
        );
    }

    /// Any non-negative price is accepted and the product gets a SKU.
    #[test]
    fn prop_non_negative_price_accepted(price in 0.0f64..1.0e9) {
        let product = Product::new("Widget", price, None).unwrap();
        prop_assert_eq!(product.price(), price);
        prop_assert!(!product.sku().is_empty());
    }

    /// A quantity of zero or less never yields an item.
    #[test]
    fn prop_non_positive_quantity_rejected(quantity in i64::MIN..=0) {
        let widget = Rc::new(Product::new("Widget", 1.0, None).unwrap());
        prop_assert_eq!(
            OrderItem::new(widget, quantity).unwrap_err(),
            ValidationError::NonPositiveQuantity { quantity }
        );
    }

    /// A rejected email leaves the stored one untouched.
    #[test]
    fn prop_invalid_email_keeps_previous(candidate in "[a-z0-9 .]{0,24}") {
        let customer =
            Customer::new("Ann", Some("ann@example.com".into()), None, None, None).unwrap();
        prop_assert!(customer.set_email(candidate.clone()).is_err());
        let email = customer.email();
        prop_assert_eq!(email.as_deref(), Some("ann@example.com"));
    }

    /// Ascending output is a stable sort of the input.
    #[test]
    fn prop_ascending_matches_stable_sort(keys in prop::collection::vec(-20i32..20, 0..64)) {
        let input = labelled(&keys);
        let sorted = sort_orders(&input, |o| o.0, false);

        let mut expected = input.clone();
        expected.sort_by_key(|o| o.0);
        prop_assert_eq!(sorted, expected);
    }

    /// Descending output has non-increasing keys and the same elements.
    #[test]
    fn prop_descending_is_permutation(keys in prop::collection::vec(-20i32..20, 0..64)) {
        let input = labelled(&keys);
        let sorted = sort_orders(&input, |o| o.0, true);

        prop_assert!(sorted.windows(2).all(|w| w[0].0 >= w[1].0));

        let mut seen: Vec<usize> = sorted.iter().map(|o| o.1).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..keys.len()).collect::<Vec<_>>());
    }

    /// A customer's spend is the sum of its order totals.
    #[test]
    fn prop_total_spent_sums_orders(quantities in prop::collection::vec(1i64..50, 0..10)) {
        let customer = Rc::new(Customer::new("Ann", None, None, None, None).unwrap());
        let widget = Rc::new(Product::new("Widget", 2.0, None).unwrap());

        let orders: Vec<Rc<Order>> = quantities
            .iter()
            .map(|&q| {
                let item = OrderItem::new(Rc::clone(&widget), q).unwrap();
                Order::new(&customer, vec![item], None, None)
            })
            .collect();

        let expected: f64 = orders.iter().map(|o| o.total_cost()).sum();
        prop_assert_eq!(customer.total_spent(), expected);
        prop_assert_eq!(customer.order_count(), quantities.len());
    }
}

#[test]
fn test_order_entry_flow() {
    let mut book = OrderBook::new();
    let ann = book.add_customer(
        Customer::new(
            "Ann",
            Some("ann@example.com".into()),
            Some("+37120000000".into()),
            Some("Riga".into()),
            Some("C-ANN".into()),
        )
        .unwrap(),
    );
    book.add_product(Product::new("Tea", 3.5, Some("TEA".into())).unwrap());
    book.add_product(Product::new("Mug", 8.0, Some("MUG".into())).unwrap());

    let day = |d: u32| Some(Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap());
    let late = book.create_order("C-ANN", "MUG", 1, day(9)).unwrap();
    let early = book.create_order("C-ANN", "TEA", 2, day(3)).unwrap();

    assert_eq!(ann.order_count(), 2);
    assert_eq!(ann.total_spent(), 15.0);
    assert!(ann
        .contact_summary()
        .starts_with("Ann (C-ANN) — orders: 2 — Ann | email: ann@example.com"));

    let by_date = sort_orders_by_date(book.orders(), false);
    assert!(Rc::ptr_eq(&by_date[0], &early));
    assert!(Rc::ptr_eq(&by_date[1], &late));

    // the book's own list keeps insertion order
    assert!(Rc::ptr_eq(&book.orders()[0], &late));
}

#[test]
fn test_rejected_form_inputs_leave_book_unchanged() {
    let mut book = OrderBook::new();
    book.add_customer(Customer::new("Ann", None, None, None, Some("C-1".into())).unwrap());

    assert!(Product::new("Broken", -3.0, None).is_err());
    assert!(book.products().is_empty());
    assert!(book.create_order("C-1", "missing", 1, None).is_err());
    assert!(book.orders().is_empty());
    assert_eq!(book.customer("C-1").unwrap().order_count(), 0);
}
