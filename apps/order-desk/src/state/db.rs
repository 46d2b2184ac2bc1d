//! # Database State
//!
//! The open database plus the order book hydrated from it.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_customer(c) ──► db.customers().insert(c) ──► book.add_customer(c)  │
//! │  add_product(p)  ──► db.products().insert(p)  ──► book.add_product(p)   │
//! │  create_order()  ──► book.build_order() ──► db.save_order()             │
//! │                                         ──► book.place_order()          │
//! │  update_contact  ──► validate ──► db update ──► customer setters        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Memory changes only after the database accepted the write, so a failed
//! write leaves the book exactly as it was. Orders are built from the book
//! because the book resolves the customer and product they reference.

use std::path::Path;
use std::rc::Rc;

use chrono::Utc;
use order_core::validation::{validate_email, validate_phone};
use order_core::{Contactable, Customer, Order, OrderBook, Product};
use order_db::{Database, DbConfig};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Database handle and the in-memory book built from it.
#[derive(Debug)]
pub struct DbState {
    db: Database,
    book: OrderBook,
}

impl DbState {
    /// Opens (creating if needed) the database file and loads the book.
    pub async fn open(path: &Path) -> AppResult<Self> {
        let db = Database::new(DbConfig::new(path)).await?;
        Self::from_database(db).await
    }

    /// Wraps an already opened database.
    pub async fn from_database(db: Database) -> AppResult<Self> {
        let book = db.load_book().await?;
        Ok(DbState { db, book })
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Persists and registers a new customer.
    pub async fn add_customer(&mut self, customer: Customer) -> AppResult<Rc<Customer>> {
        self.db.customers().insert(&customer).await?;
        let customer = self.book.add_customer(customer);
        info!(customer_id = %customer.customer_id(), "Customer added");
        Ok(customer)
    }

    /// Persists and registers a new product.
    pub async fn add_product(&mut self, product: Product) -> AppResult<Rc<Product>> {
        self.db.products().insert(&product).await?;
        let product = self.book.add_product(product);
        info!(sku = %product.sku(), "Product added");
        Ok(product)
    }

    /// Places a one-item order stamped with the current time and saves it.
    pub async fn create_order(
        &mut self,
        customer_id: &str,
        sku: &str,
        quantity: i64,
    ) -> AppResult<Rc<Order>> {
        let order = self
            .book
            .build_order(customer_id, sku, quantity, Some(Utc::now()))?;
        self.db.save_order(&order).await?;
        self.book.place_order(Rc::clone(&order));
        info!(order_id = %order.order_id(), total = order.total_cost(), "Order created");
        Ok(order)
    }

    /// Replaces a customer's email and/or phone and saves the result.
    ///
    /// Both values are validated and stored before the customer changes;
    /// on failure the customer keeps its previous contact details.
    pub async fn update_contact(
        &mut self,
        customer_id: &str,
        email: Option<String>,
        phone: Option<String>,
    ) -> AppResult<Rc<Customer>> {
        let customer = self
            .book
            .customer(customer_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Customer", customer_id))?;

        if let Some(email) = &email {
            validate_email(email)?;
        }
        if let Some(phone) = &phone {
            validate_phone(phone)?;
        }

        let stored_email = email.clone().or_else(|| customer.email());
        let stored_phone = phone.clone().or_else(|| customer.phone());
        self.db
            .customers()
            .update_contact(customer_id, stored_email.as_deref(), stored_phone.as_deref())
            .await?;

        if let Some(email) = email {
            customer.set_email(email)?;
        }
        if let Some(phone) = phone {
            customer.set_phone(phone)?;
        }
        Ok(customer)
    }

    /// Closes the database pool.
    pub async fn close(self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    async fn state() -> DbState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut state = DbState::from_database(db).await.unwrap();
        state
            .add_customer(Customer::new("Ann", None, None, None, Some("C-1".into())).unwrap())
            .await
            .unwrap();
        state
            .add_product(Product::new("Tea", 2.5, Some("TEA".into())).unwrap())
            .await
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_create_order_persists() {
        let mut state = state().await;
        let order = state.create_order("C-1", "TEA", 4).await.unwrap();

        assert_eq!(order.total_cost(), 10.0);
        assert_eq!(state.inner().orders().count().await.unwrap(), 1);

        let reloaded = state.inner().load_book().await.unwrap();
        assert_eq!(reloaded.customer("C-1").unwrap().total_spent(), 10.0);
    }

    #[tokio::test]
    async fn test_create_order_unknown_customer() {
        let mut state = state().await;
        let err = state.create_order("nobody", "TEA", 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(state.inner().orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_customer_not_added_to_book() {
        let mut state = state().await;
        let err = state
            .add_customer(Customer::new("Impostor", None, None, None, Some("C-1".into())).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.book().customer("C-1").unwrap().name(), "Ann");
    }

    #[tokio::test]
    async fn test_update_contact_is_all_or_nothing() {
        let mut state = state().await;

        let err = state
            .update_contact("C-1", Some("ann@example.com".into()), Some("bad".into()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.book().customer("C-1").unwrap().email(), None);

        state
            .update_contact("C-1", Some("ann@example.com".into()), None)
            .await
            .unwrap();
        let stored = state.inner().customers().get_by_id("C-1").await.unwrap().unwrap();
        assert_eq!(stored.email.as_deref(), Some("ann@example.com"));
    }

    #[tokio::test]
    async fn test_failed_order_save_leaves_book_unchanged() {
        let mut state = state().await;
        state.inner().close().await;

        let err = state.create_order("C-1", "TEA", 4).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let customer = state.book().customer("C-1").unwrap();
        assert!(state.book().orders().is_empty());
        assert_eq!(customer.order_count(), 0);
        assert_eq!(customer.total_spent(), 0.0);
    }

    #[tokio::test]
    async fn test_failed_contact_save_keeps_old_contact() {
        let mut state = state().await;
        state.inner().close().await;

        let err = state
            .update_contact("C-1", Some("ann@example.com".into()), Some("+37120000000".into()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let customer = state.book().customer("C-1").unwrap();
        assert_eq!(customer.email(), None);
        assert_eq!(customer.phone(), None);
    }
}
