//! # order-core: Pure Domain Logic for Order Desk
//!
//! This crate is the **heart** of Order Desk. It holds the domain model, its
//! invariants, and the order sorting routine, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    order-desk (terminal)                        │   │
//! │  │    Customers form ──► Products form ──► Orders form ──► Reports │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ order-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ entities  │  │   sort    │  │   book    │  │  report   │  │   │
//! │  │   │ Product   │  │ partition │  │ registry  │  │ rankings  │  │   │
//! │  │   │ Customer  │  │   sort    │  │ by id     │  │ timeline  │  │   │
//! │  │   │ Order     │  │           │  │           │  │ graph     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    order-db (Database Layer)                    │   │
//! │  │              SQLite schema, repositories, hydration             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`], [`customer`], [`order`] - Domain entities
//! - [`validation`] - Contact patterns and field rules
//! - [`sort`] - The partition sort over orders
//! - [`book`] - In-memory registry used by the form
//! - [`report`] - Rankings, orders over time, customer-product graph
//! - [`id`] - Opaque identifiers
//! - [`error`] - Domain error types
//!
//! ## Single-Threaded by Construction
//! Entities are linked with `Rc` and mutated through `RefCell`, so none of
//! them is `Send`. Sharing a customer across threads does not compile.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use order_core::{Customer, Order, OrderItem, Product};
//!
//! let ann = Rc::new(Customer::new("Ann", Some("a@example.com".into()), None, None, None)?);
//! let widget = Rc::new(Product::new("Widget", 10.0, None)?);
//!
//! let order = Order::new(&ann, vec![OrderItem::new(widget, 2)?], None, None);
//!
//! assert_eq!(order.total_cost(), 20.0);
//! assert_eq!(ann.total_spent(), 20.0);
//! # Ok::<(), order_core::ValidationError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod customer;
pub mod error;
pub mod id;
pub mod order;
pub mod product;
pub mod report;
pub mod sort;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use book::OrderBook;
pub use customer::{base_contact_summary, Contactable, Customer, Person};
pub use error::{CoreError, CoreResult, RegistrationError, ValidationError};
pub use order::{Order, OrderItem};
pub use product::Product;
pub use sort::{sort_orders, sort_orders_by_date, FloatKey};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of rows in ranked reports.
pub const DEFAULT_TOP_N: usize = 5;
