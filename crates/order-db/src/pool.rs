//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path)           ← pool settings                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await   ← pool + migrations                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.load_book().await          ← rows → linked Customer/Product/Order   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! File databases run in WAL mode with foreign keys enforced. In-memory
//! databases (tests) keep SQLite's default journal.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use order_core::{Order, OrderBook, OrderItem};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::customer::CustomerRepository;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/orders.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration for the database file at `path`.
    /// The file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an isolated in-memory database configuration (for tests).
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    /// Whether this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        // SQLite ships with foreign keys off
        Ok(options.foreign_keys(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, runs migrations.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::new("./orders.db")).await?;
    /// ```
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = config.connect_options()?;
        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns `(total_migrations, applied_migrations)`.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Persists an order and its items.
    pub async fn save_order(&self, order: &Order) -> DbResult<()> {
        self.orders().insert(order).await
    }

    /// Loads everything into an [`OrderBook`].
    ///
    /// Orders are rebuilt oldest first, so each customer's order list comes
    /// back in `created_at` order. Every row is re-validated on the way in.
    pub async fn load_book(&self) -> DbResult<OrderBook> {
        let mut book = OrderBook::new();

        for record in self.customers().list().await? {
            book.add_customer(record.into_customer()?);
        }
        for record in self.products().list().await? {
            book.add_product(record.into_product()?);
        }

        let orders = self.orders();
        for header in orders.list().await? {
            let customer = book
                .customer(&header.customer_id)
                .cloned()
                .ok_or_else(|| DbError::not_found("Customer", &header.customer_id))?;

            let mut items = Vec::new();
            for row in orders.items_for(&header.order_id).await? {
                let product = book
                    .product(&row.sku)
                    .cloned()
                    .ok_or_else(|| DbError::not_found("Product", &row.sku))?;
                let item = OrderItem::new(product, row.quantity).map_err(|reason| {
                    DbError::invalid_record("OrderItem", &header.order_id, reason)
                })?;
                items.push(item);
            }

            let order = Order::new(
                &customer,
                items,
                Some(header.created_at),
                Some(header.order_id),
            );
            book.insert_order(order);
        }

        info!(
            customers = book.customers().len(),
            products = book.products().len(),
            orders = book.orders().len(),
            "Order book loaded"
        );
        Ok(book)
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use order_core::{Customer, Product};
    use std::rc::Rc;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        let (total, applied) = db.migration_status().await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/orders.db")
            .max_connections(10)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(3))
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_load_book_relinks_orders() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ann = Rc::new(Customer::new("Ann", None, None, None, Some("C-1".into())).unwrap());
        let tea = Rc::new(Product::new("Tea", 2.0, Some("TEA".into())).unwrap());
        db.customers().insert(&ann).await.unwrap();
        db.products().insert(&tea).await.unwrap();

        for (id, day, qty) in [("O-2", 5, 3), ("O-1", 1, 1)] {
            let at = Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap();
            let item = OrderItem::new(Rc::clone(&tea), qty).unwrap();
            db.save_order(&Order::new(&ann, vec![item], Some(at), Some(id.into())))
                .await
                .unwrap();
        }

        let book = db.load_book().await.unwrap();
        let customer = book.customer("C-1").unwrap();
        let ids: Vec<String> = customer
            .orders()
            .iter()
            .map(|o| o.order_id().to_string())
            .collect();
        assert_eq!(ids, ["O-1", "O-2"]);
        assert_eq!(customer.total_spent(), 8.0);

        let order = book.order("O-2").unwrap();
        assert!(Rc::ptr_eq(&order.customer().unwrap(), customer));
        assert!(Rc::ptr_eq(
            order.items()[0].product(),
            book.product("TEA").unwrap()
        ));
    }

    #[tokio::test]
    async fn test_close() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }
}
