//! # Product
//!
//! A sellable product. Immutable after construction and shared by every
//! [`OrderItem`](crate::order::OrderItem) that references it.

use std::fmt;

use crate::id::id_or_generate;
use crate::validation::{validate_price, validate_required, ValidationResult};

/// A product available for ordering.
///
/// Identity is the SKU: two products with the same SKU compare equal.
#[derive(Debug, Clone)]
pub struct Product {
    name: String,
    price: f64,
    sku: String,
}

impl Product {
    /// Creates a product.
    ///
    /// ## Rules
    /// - `price` must be >= 0, otherwise `NegativePrice` and no product exists
    /// - `name` must not be blank
    /// - a missing or blank `sku` is generated
    ///
    /// ## Example
    /// ```rust
    /// use order_core::Product;
    ///
    /// let widget = Product::new("Widget", 10.0, None).unwrap();
    /// assert!(!widget.sku().is_empty());
    /// assert!(Product::new("Widget", -1.0, None).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: f64, sku: Option<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_price(price)?;
        validate_required("name", &name)?;

        Ok(Product {
            name,
            price,
            sku: id_or_generate(sku),
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Stock keeping unit.
    pub fn sku(&self) -> &str {
        &self.sku
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.sku == other.sku
    }
}

impl Eq for Product {}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product(name={:?}, price={:.2}, sku={})",
            self.name, self.price, self.sku
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_negative_price_rejected() {
        let err = Product::new("X", -1.0, None).unwrap_err();
        assert_eq!(err, ValidationError::NegativePrice { price: -1.0 });
    }

    #[test]
    fn test_free_product_allowed() {
        let product = Product::new("Sample", 0.0, None).unwrap();
        assert_eq!(product.price(), 0.0);
    }

    #[test]
    fn test_caller_supplied_sku_kept() {
        let product = Product::new("Widget", 2.5, Some("WID-1".to_string())).unwrap();
        assert_eq!(product.sku(), "WID-1");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            Product::new(" ", 1.0, None),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_equality_by_sku() {
        let a = Product::new("Widget", 1.0, Some("SKU-1".to_string())).unwrap();
        let b = Product::new("Widget v2", 3.0, Some("SKU-1".to_string())).unwrap();
        let c = Product::new("Widget", 1.0, None).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let product = Product::new("Widget", 10.0, Some("W".to_string())).unwrap();
        assert_eq!(
            product.to_string(),
            "Product(name=\"Widget\", price=10.00, sku=W)"
        );
    }
}
