//! # Error Types
//!
//! Domain-specific error types for order-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  order-core errors (this file)                                         │
//! │  ├── CoreError        - Lookups against the order book                 │
//! │  └── ValidationError  - Rejected construction or assignment            │
//! │                                                                         │
//! │  order-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  order-desk errors (in app)                                            │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → AppError → Terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every validation variant carries the rejected value
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while working against an [`OrderBook`](crate::book::OrderBook).
#[derive(Debug, Error)]
pub enum CoreError {
    /// No customer is registered under this id.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// No product is registered under this SKU.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No order is registered under this id.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Domain validation failures.
///
/// Raised synchronously at the point of the offending construction or
/// assignment. Constructors and setters never swallow these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A product price below zero (or not a number).
    #[error("Price cannot be negative: {price}")]
    NegativePrice { price: f64 },

    /// An order item quantity of zero or less.
    #[error("Quantity must be > 0, got {quantity}")]
    NonPositiveQuantity { quantity: i64 },

    /// An email that does not look like `local@domain.tld`.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// A phone number that is not 7-15 digits with an optional leading `+`.
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },
}

// =============================================================================
// Registration Error
// =============================================================================

/// An order could not be attached to its customer's order list.
///
/// [`Order::new`](crate::order::Order::new) logs and swallows this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Order {order_id} could not be registered with customer {customer_id}")]
pub struct RegistrationError {
    pub customer_id: String,
    pub order_id: String,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::InvalidEmail("not-an-email".to_string());
        assert_eq!(err.to_string(), "Invalid email: not-an-email");

        let err = ValidationError::NonPositiveQuantity { quantity: 0 };
        assert_eq!(err.to_string(), "Quantity must be > 0, got 0");

        let err = CoreError::CustomerNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Customer not found: abc");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NegativePrice { price: -1.0 };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(
            core_err,
            CoreError::Validation(ValidationError::NegativePrice { .. })
        ));
    }
}
