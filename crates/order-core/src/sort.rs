//! # Order Sorting
//!
//! A recursive three-way partition sort over orders.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sort([o1 .. on], key, reverse)                                         │
//! │                                                                         │
//! │  n <= 1 ──────────────────────────────► copy of input                   │
//! │                                                                         │
//! │  pivot = input[n / 2]                                                   │
//! │  less    = [o | key(o) <  key(pivot)]   (input order kept)              │
//! │  equal   = [o | key(o) == key(pivot)]   (input order kept)              │
//! │  greater = [o | key(o) >  key(pivot)]   (input order kept)              │
//! │                                                                         │
//! │  result = sort(less) ++ equal ++ sort(greater)                          │
//! │  reverse? ── yes ──► result.reverse()   ◄── at EVERY level              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ascending, equal keys keep their input order. Descending is NOT the
//! mirror of ascending: because each level reverses its own concatenation,
//! runs of equal keys come out in an order that depends on the recursion.
//!
//! ```rust
//! use order_core::sort::sort_orders;
//!
//! let keys = [2, 1, 2];
//! let labels = ["a", "b", "c"];
//! let input: Vec<(i32, &str)> = keys.into_iter().zip(labels).collect();
//!
//! let asc = sort_orders(&input, |o| o.0, false);
//! assert_eq!(asc, vec![(1, "b"), (2, "a"), (2, "c")]);
//!
//! let desc = sort_orders(&input, |o| o.0, true);
//! assert_eq!(desc, vec![(2, "a"), (2, "c"), (1, "b")]);
//! ```

use std::cmp::Ordering;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::order::Order;

/// Sorts `orders` by `key`, returning a new vector. The input is untouched.
///
/// Works for any cloneable element (usually `Rc<Order>`) and any totally
/// ordered key. Use [`FloatKey`] for `f64` keys.
pub fn sort_orders<T, K, F>(orders: &[T], key: F, reverse: bool) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    partition_sort(orders, &key, reverse)
}

/// Sorts orders by `created_at`.
pub fn sort_orders_by_date(orders: &[Rc<Order>], reverse: bool) -> Vec<Rc<Order>> {
    sort_orders(orders, by_created_at, reverse)
}

/// Key: order creation time.
pub fn by_created_at(order: &Rc<Order>) -> DateTime<Utc> {
    order.created_at()
}

/// Key: order total.
pub fn by_total_cost(order: &Rc<Order>) -> FloatKey {
    FloatKey(order.total_cost())
}

/// Key: id of the ordering customer.
pub fn by_customer_id(order: &Rc<Order>) -> String {
    order.customer_id().to_string()
}

fn partition_sort<T, K, F>(orders: &[T], key: &F, reverse: bool) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    if orders.len() <= 1 {
        return orders.to_vec();
    }

    let pivot_key = key(&orders[orders.len() / 2]);

    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for order in orders {
        match key(order).cmp(&pivot_key) {
            Ordering::Less => less.push(order.clone()),
            Ordering::Equal => equal.push(order.clone()),
            Ordering::Greater => greater.push(order.clone()),
        }
    }

    let mut result = partition_sort(&less, key, reverse);
    result.append(&mut equal);
    result.append(&mut partition_sort(&greater, key, reverse));

    if reverse {
        result.reverse();
    }
    result
}

// =============================================================================
// Float Keys
// =============================================================================

/// An `f64` ordered by [`f64::total_cmp`], so it can key a sort.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(pub f64);

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
