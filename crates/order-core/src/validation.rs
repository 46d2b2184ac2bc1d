//! # Validation Module
//!
//! Field rules shared by the entity constructors and setters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (order-desk)                                            │
//! │  ├── Parse numbers (price, quantity)                                   │
//! │  └── Show "Validation error: ..." to the operator                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity constructors / setters                                │
//! │  └── THIS MODULE: contact patterns, price, quantity, required names    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use order_core::validation::{validate_email, validate_phone};
//!
//! assert!(validate_email("ann@example.com").is_ok());
//! assert!(validate_phone("+1234567890").is_ok());
//! assert!(validate_phone("abc").is_err());
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// `local-part@domain.tld`: word/dot/hyphen runs, a literal dot, a word tld.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("Invalid email regex pattern")
});

/// Optional leading `+`, then 7 to 15 digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("Invalid phone regex pattern"));

// =============================================================================
// Contact Validators
// =============================================================================

/// Validates an email address.
///
/// ## Example
/// ```rust
/// use order_core::validation::validate_email;
///
/// assert!(validate_email("first.last@mail-host.org").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// Validates a phone number.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(phone.to_string()))
    }
}

// =============================================================================
// Entity Field Validators
// =============================================================================

/// Validates that a required text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - NaN is rejected like a negative price
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if price >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativePrice { price })
    }
}

/// Validates an order item quantity (> 0).
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity { quantity });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
