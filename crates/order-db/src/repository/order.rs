//! # Order Repository
//!
//! Database operations for orders and their items.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert(&order)                                                         │
//! │     BEGIN                                                               │
//! │     ├── INSERT INTO orders (order_id, customer_id, created_at)          │
//! │     ├── INSERT INTO order_items (order_id, sku, quantity)  × n          │
//! │     COMMIT             (any failure rolls the whole order back)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use order_core::Order;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::map_insert_error;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order together with its items in one transaction.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - customer or a product is not stored
    /// * `Err(DbError::UniqueViolation)` - order id already exists
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        let items = order.items();
        debug!(
            order_id = %order.order_id(),
            customer_id = %order.customer_id(),
            items = items.len(),
            "Inserting order"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, customer_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(order.order_id())
        .bind(order.customer_id())
        .bind(order.created_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, order.order_id()))?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, sku, quantity)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(order.order_id())
            .bind(item.product().sku())
            .bind(item.quantity())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Gets an order header by id.
    pub async fn get_by_id(&self, order_id: &str) -> DbResult<Option<OrderRecord>> {
        let record = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT order_id, customer_id, created_at
            FROM orders
            WHERE order_id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists order headers, oldest first.
    pub async fn list(&self) -> DbResult<Vec<OrderRecord>> {
        let records = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT order_id, customer_id, created_at
            FROM orders
            ORDER BY created_at, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Listed orders");
        Ok(records)
    }

    /// Items of one order, in the order they were added.
    pub async fn items_for(&self, order_id: &str) -> DbResult<Vec<OrderItemRecord>> {
        let records = sqlx::query_as::<_, OrderItemRecord>(
            r#"
            SELECT order_id, sku, quantity
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Counts stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Record Types
// =============================================================================

/// A row of the `orders` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
}

/// A row of the `order_items` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct OrderItemRecord {
    pub order_id: String,
    pub sku: String,
    pub quantity: i64,
}
