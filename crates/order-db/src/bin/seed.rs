//! # Seed Data Generator
//!
//! Populates the database with demo customers, products and orders.
//!
//! ## Usage
//! ```bash
//! # 20 customers, 200 orders (default)
//! cargo run -p order-db --bin seed
//!
//! cargo run -p order-db --bin seed -- --customers 50 --orders 1000 --db ./data/orders.db
//! ```
//!
//! Data is deterministic: the same counts always produce the same rows.

use std::rc::Rc;

use chrono::{Duration, TimeZone, Utc};
use clap::Parser;
use order_core::{Customer, Order, OrderItem, Product};
use order_db::{Database, DbConfig};

const FIRST_NAMES: &[&str] = &[
    "Anna", "Bruno", "Chloe", "Dmitri", "Elif", "Farah", "Gustav", "Hana", "Ilse", "Jonas",
];

const CITIES: &[&str] = &["Riga", "Tallinn", "Vilnius", "Helsinki", "Oslo"];

/// (sku, name, price)
const CATALOGUE: &[(&str, &str, f64)] = &[
    ("TEA-GRN", "Green tea", 4.5),
    ("TEA-BLK", "Black tea", 3.9),
    ("MUG-CER", "Ceramic mug", 8.0),
    ("KTL-STL", "Steel kettle", 29.0),
    ("HNY-JAR", "Honey jar", 6.25),
    ("CUP-SET", "Cup set", 18.5),
];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Order Desk seed data generator")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./orders_dev.db")]
    db: String,

    /// Number of customers to generate
    #[arg(short, long, default_value_t = 20)]
    customers: usize,

    /// Number of orders to generate
    #[arg(short, long, default_value_t = 200)]
    orders: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Order Desk Seed Data Generator");
    println!("=================================");
    println!("Database:  {}", args.db);
    println!("Customers: {}", args.customers);
    println!("Orders:    {}", args.orders);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.orders().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} orders", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    let mut products = Vec::with_capacity(CATALOGUE.len());
    for (sku, name, price) in CATALOGUE {
        let product = Rc::new(Product::new(*name, *price, Some(sku.to_string()))?);
        db.products().insert(&product).await?;
        products.push(product);
    }
    println!("✓ {} products", products.len());

    let mut customers = Vec::with_capacity(args.customers);
    for i in 0..args.customers {
        let customer = Rc::new(generate_customer(i)?);
        db.customers().insert(&customer).await?;
        customers.push(customer);
    }
    println!("✓ {} customers", customers.len());

    if customers.is_empty() {
        println!("  No customers, skipping orders.");
        return Ok(());
    }

    let origin = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().ok_or("bad origin")?;
    for i in 0..args.orders {
        // skew towards the first customers so rankings are interesting
        let customer = &customers[(i * i + i / 3) % customers.len()];
        let product = &products[(i * 7) % products.len()];
        let quantity = 1 + (i % 4) as i64;
        let created_at = origin + Duration::hours((i * 13) as i64);

        let mut items = vec![OrderItem::new(Rc::clone(product), quantity)?];
        if i % 5 == 0 {
            items.push(OrderItem::new(Rc::clone(&products[(i + 2) % products.len()]), 1)?);
        }

        let order = Order::new(customer, items, Some(created_at), Some(format!("ORD-{i:05}")));
        if let Err(e) = db.save_order(&order).await {
            eprintln!("Failed to insert {}: {}", order.order_id(), e);
            continue;
        }

        if (i + 1) % 100 == 0 {
            println!("  Generated {} orders...", i + 1);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} orders in {:?}", db.orders().count().await?, elapsed);
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

fn generate_customer(i: usize) -> Result<Customer, order_core::ValidationError> {
    let first = FIRST_NAMES[i % FIRST_NAMES.len()];
    let name = format!("{} {}", first, i / FIRST_NAMES.len() + 1);
    let email = format!("{}.{}@example.com", first.to_lowercase(), i);
    let phone = format!("+3712{:07}", i);
    let city = CITIES[i % CITIES.len()].to_string();

    Customer::new(
        name,
        Some(email),
        Some(phone),
        Some(city),
        Some(format!("CUST-{i:04}")),
    )
}
