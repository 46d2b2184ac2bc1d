//! Opaque identifiers for customers, products (SKU) and orders.

use uuid::Uuid;

/// Generates a fresh identifier: a random UUID v4 as 32 lowercase hex chars.
///
/// ## Example
/// ```rust
/// use order_core::id::generate_id;
///
/// let id = generate_id();
/// assert_eq!(id.len(), 32);
/// assert_ne!(id, generate_id());
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Returns the caller-supplied id, or a generated one when absent or blank.
pub(crate) fn id_or_generate(id: Option<String>) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id,
        _ => generate_id(),
    }
}
