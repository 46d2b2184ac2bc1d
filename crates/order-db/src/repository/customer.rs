//! # Customer Repository
//!
//! Database operations for customers.

use order_core::{Contactable, Customer};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::map_insert_error;

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
/// repo.insert(&customer).await?;
/// let stored = repo.get_by_id(customer.customer_id()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - customer id already exists
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(customer_id = %customer.customer_id(), "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (customer_id, name, email, phone, city)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(customer.customer_id())
        .bind(customer.name())
        .bind(customer.email())
        .bind(customer.phone())
        .bind(customer.city())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, customer.customer_id()))?;

        Ok(())
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, customer_id: &str) -> DbResult<Option<CustomerRecord>> {
        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT customer_id, name, email, phone, city
            FROM customers
            WHERE customer_id = ?1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists customers in insertion order.
    pub async fn list(&self) -> DbResult<Vec<CustomerRecord>> {
        let records = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT customer_id, name, email, phone, city
            FROM customers
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Listed customers");
        Ok(records)
    }

    /// Replaces a customer's stored email and phone.
    ///
    /// The values are written as given; callers validate them first.
    pub async fn update_contact(
        &self,
        customer_id: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> DbResult<()> {
        debug!(customer_id = %customer_id, "Updating customer contact");

        let result = sqlx::query(
            r#"
            UPDATE customers SET email = ?2, phone = ?3
            WHERE customer_id = ?1
            "#,
        )
        .bind(customer_id)
        .bind(email)
        .bind(phone)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", customer_id));
        }

        Ok(())
    }

    /// Counts stored customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Record Type
// =============================================================================

/// A row of the `customers` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

impl CustomerRecord {
    /// Rebuilds the domain customer, re-running contact validation.
    pub fn into_customer(self) -> DbResult<Customer> {
        let id = self.customer_id.clone();
        Customer::new(self.name, self.email, self.phone, self.city, Some(self.customer_id))
            .map_err(|reason| DbError::invalid_record("Customer", id, reason))
    }
}
