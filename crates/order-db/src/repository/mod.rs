//! # Repository Module
//!
//! Database repository implementations for Order Desk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order-desk command                                                     │
//! │       │  db.orders().insert(&order)                                     │
//! │       ▼                                                                 │
//! │  OrderRepository ── SQL ──► SQLite                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRecord (FromRow) ── into domain ──► Order                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories take domain types in and hand plain records back. Turning
//! records into linked domain objects happens in
//! [`Database::load_book`](crate::Database::load_book).
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customers and contact updates
//! - [`ProductRepository`](product::ProductRepository) - Product catalogue
//! - [`OrderRepository`](order::OrderRepository) - Orders and their items

pub mod customer;
pub mod order;
pub mod product;

use crate::error::DbError;

/// Maps a sqlx error, filling in the offending key on unique violations.
pub(crate) fn map_insert_error(err: sqlx::Error, key: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
            field,
            value: key.to_string(),
        },
        other => other,
    }
}
