//! # App Error Type
//!
//! Unified error type for commands and the interactive form.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ─┐                                                     │
//! │  CoreError ───────┤                                                     │
//! │  DbError ─────────┼──► AppError { code, message } ──► stderr / --json   │
//! │  ConfigError ─────┤                                                     │
//! │  dialoguer::Error ┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged in full and reported with a generic message.

use order_core::{CoreError, ValidationError};
use order_db::DbError;
use serde::Serialize;

use crate::state::ConfigError;

/// Error returned from commands and form actions.
///
/// With `--json` this is what gets printed:
/// ```json
/// { "code": "NOT_FOUND", "message": "Customer not found: C-404" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for app errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced customer, product or order does not exist
    NotFound,

    /// Input rejected by a domain rule
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Configuration could not be loaded
    ConfigError,

    /// Terminal prompt failed
    PromptError,

    /// Anything else
    Internal,
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => AppError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::InvalidRecord { entity, id, reason } => {
                tracing::error!(%entity, %id, %reason, "Stored record failed validation");
                AppError::new(
                    ErrorCode::DatabaseError,
                    format!("Stored {} {} is invalid: {}", entity, id, reason),
                )
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::validation("Invalid reference")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CustomerNotFound(id) => AppError::not_found("Customer", &id),
            CoreError::ProductNotFound(sku) => AppError::not_found("Product", &sku),
            CoreError::OrderNotFound(id) => AppError::not_found("Order", &id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::new(ErrorCode::PromptError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON encoding failed: {}", err);
        AppError::internal("Could not encode output")
    }
}

/// The line shown to the operator.
impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            ErrorCode::ValidationError => write!(f, "Validation error: {}", self.message),
            _ => write!(f, "Error: {}", self.message),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err: AppError = ValidationError::NegativePrice { price: -1.0 }.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Validation error: Price cannot be negative: -1");
    }

    #[test]
    fn test_core_error_mapping() {
        let err: AppError = CoreError::CustomerNotFound("C-404".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Error: Customer not found: C-404");

        let err: AppError =
            CoreError::Validation(ValidationError::NonPositiveQuantity { quantity: 0 }).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_db_error_hides_internals() {
        let err: AppError = DbError::QueryFailed("syntax error near SELEC".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_json_shape() {
        let err = AppError::not_found("Order", "O-1");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"code":"NOT_FOUND","message":"Order not found: O-1"}"#
        );
    }
}
