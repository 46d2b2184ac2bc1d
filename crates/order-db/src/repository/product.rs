//! # Product Repository
//!
//! Database operations for the product catalogue.

use order_core::Product;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::map_insert_error;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(sku = %product.sku(), "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (sku, name, price)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(product.sku())
        .bind(product.name())
        .bind(product.price())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, product.sku()))?;

        Ok(())
    }

    /// Gets a product by its SKU.
    ///
    /// ## Returns
    /// * `Ok(Some(ProductRecord))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<ProductRecord>> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT sku, name, price
            FROM products
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists products in insertion order.
    pub async fn list(&self) -> DbResult<Vec<ProductRecord>> {
        let records = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT sku, name, price
            FROM products
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Listed products");
        Ok(records)
    }

    /// Counts stored products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Record Type
// =============================================================================

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct ProductRecord {
    pub sku: String,
    pub name: String,
    pub price: f64,
}

impl ProductRecord {
    /// Rebuilds the domain product.
    pub fn into_product(self) -> DbResult<Product> {
        let sku = self.sku.clone();
        Product::new(self.name, self.price, Some(self.sku))
            .map_err(|reason| DbError::invalid_record("Product", sku, reason))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use order_core::Product;

    #[tokio::test]
    async fn test_insert_list_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tea = Product::new("Tea", 3.5, Some("TEA".to_string())).unwrap();
        let mug = Product::new("Mug", 8.0, Some("MUG".to_string())).unwrap();
        db.products().insert(&tea).await.unwrap();
        db.products().insert(&mug).await.unwrap();

        let skus: Vec<String> = db
            .products()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.sku)
            .collect();
        assert_eq!(skus, ["TEA", "MUG"]);

        let record = db.products().get_by_sku("MUG").await.unwrap().unwrap();
        assert_eq!(record.price, 8.0);
        assert_eq!(record.into_product().unwrap(), mug);
        assert_eq!(db.products().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tea = Product::new("Tea", 3.5, Some("TEA".to_string())).unwrap();
        db.products().insert(&tea).await.unwrap();

        assert!(matches!(
            db.products().insert(&tea).await,
            Err(DbError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_negative_price_blocked_by_schema() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let result = sqlx::query("INSERT INTO products (sku, name, price) VALUES ('X', 'X', -1)")
            .execute(db.pool())
            .await;
        assert!(result.is_err());
    }
}
