//! # Interactive Form
//!
//! Menu-driven data entry for customers, products and orders, opened when
//! `order-desk` runs without a subcommand.
//!
//! ```text
//! Main menu ──► Customers ──► Add / List
//!           ├─► Products  ──► Add / List
//!           ├─► Orders    ──► Create / List
//!           ├─► Reports   ──► Top customers / Timeline / Top products / Graph
//!           └─► Quit
//! ```
//!
//! Every entry goes through the same command handlers as the CLI, so a
//! rejected value prints its error and returns to the menu with nothing
//! saved. Prompt failures (closed stdin, Ctrl-C) end the form.

use dialoguer::{Input, Select};

use crate::cli::{CustomerCommand, OrderCommand, ProductCommand, ReportCommand, SortKey};
use crate::commands::{self, non_blank};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::state::{AppConfig, DbState};

const MAIN_MENU: &[&str] = &["Customers", "Products", "Orders", "Reports", "Quit"];

/// Runs the form until the operator picks Quit.
pub async fn run_form(state: &mut DbState, config: &AppConfig) -> AppResult<()> {
    println!("Order Desk ({})\n", config.database_path.display());

    loop {
        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(MAIN_MENU)
            .default(0)
            .interact()?;

        let outcome = match selection {
            0 => customers(state, config).await,
            1 => products(state, config).await,
            2 => orders(state, config).await,
            3 => reports(state, config),
            _ => return Ok(()),
        };

        match outcome {
            Ok(Some(text)) => println!("{text}\n"),
            Ok(None) => {}
            Err(err) if err.code == ErrorCode::PromptError => return Err(err),
            Err(err) => println!("{err}\n"),
        }
    }
}

async fn customers(state: &mut DbState, config: &AppConfig) -> AppResult<Option<String>> {
    match submenu("Customers", &["Add customer", "List customers"])? {
        Some(0) => {
            let cmd = CustomerCommand::Add {
                name: prompt("Name")?,
                email: optional(prompt("Email")?),
                phone: optional(prompt("Phone")?),
                city: optional(prompt("City")?),
                id: None,
            };
            commands::customer::run(cmd, state, config, false).await.map(Some)
        }
        Some(_) => commands::customer::run(CustomerCommand::List, state, config, false)
            .await
            .map(Some),
        None => Ok(None),
    }
}

async fn products(state: &mut DbState, config: &AppConfig) -> AppResult<Option<String>> {
    match submenu("Products", &["Add product", "List products"])? {
        Some(0) => {
            let name = prompt("Name")?;
            let price = parse_price(&prompt("Price")?)?;
            let cmd = ProductCommand::Add { name, price, sku: None };
            commands::product::run(cmd, state, config, false).await.map(Some)
        }
        Some(_) => commands::product::run(ProductCommand::List, state, config, false)
            .await
            .map(Some),
        None => Ok(None),
    }
}

async fn orders(state: &mut DbState, config: &AppConfig) -> AppResult<Option<String>> {
    match submenu("Orders", &["Create order", "List orders"])? {
        Some(0) => {
            let customer = prompt("Customer ID")?;
            let sku = prompt("Product SKU")?;
            let quantity = parse_quantity(&prompt("Quantity")?)?;
            let cmd = OrderCommand::Create { customer, sku, quantity };
            commands::order::run(cmd, state, config, false).await.map(Some)
        }
        Some(_) => {
            let cmd = OrderCommand::List {
                sort: SortKey::Date,
                desc: false,
            };
            commands::order::run(cmd, state, config, false).await.map(Some)
        }
        None => Ok(None),
    }
}

fn reports(state: &DbState, config: &AppConfig) -> AppResult<Option<String>> {
    let choice = submenu(
        "Reports",
        &["Top customers", "Orders over time", "Top products", "Customer-product graph"],
    )?;
    let cmd = match choice {
        Some(0) => ReportCommand::TopCustomers { n: None },
        Some(1) => ReportCommand::Timeline,
        Some(2) => ReportCommand::TopProducts { k: None },
        Some(_) => ReportCommand::Graph,
        None => return Ok(None),
    };
    commands::report::run(&cmd, state.book(), config, false).map(Some)
}

/// Shows `items` plus a trailing Back entry. `None` means Back.
fn submenu(title: &str, items: &[&str]) -> AppResult<Option<usize>> {
    let mut entries = items.to_vec();
    entries.push("Back");

    let selection = Select::new()
        .with_prompt(title)
        .items(&entries)
        .default(0)
        .interact()?;

    Ok((selection < items.len()).then_some(selection))
}

fn prompt(label: &str) -> AppResult<String> {
    let value = Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn optional(value: String) -> Option<String> {
    non_blank(Some(value))
}

/// Parses the price field.
pub fn parse_price(input: &str) -> AppResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::validation("Invalid price"))
}

/// Parses the quantity field. A blank field means one.
pub fn parse_quantity(input: &str) -> AppResult<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(1);
    }
    input
        .parse::<i64>()
        .map_err(|_| AppError::validation("Invalid quantity"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 12.50 ").unwrap(), 12.5);
        assert_eq!(parse_price("-3").unwrap(), -3.0);

        let err = parse_price("twelve").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid price");
        assert!(parse_price("").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("").unwrap(), 1);
        assert_eq!(parse_quantity("  ").unwrap(), 1);
        assert_eq!(parse_quantity("4").unwrap(), 4);
        assert_eq!(parse_quantity("0").unwrap(), 0);

        let err = parse_quantity("1.5").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid quantity");
    }

    #[test]
    fn test_optional_blank_fields() {
        assert_eq!(optional(" ".to_string()), None);
        assert_eq!(optional("Riga".to_string()).as_deref(), Some("Riga"));
    }
}
