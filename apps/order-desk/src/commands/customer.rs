//! # Customer Commands

use order_core::{Contactable, Customer};
use serde::Serialize;

use crate::cli::CustomerCommand;
use crate::commands::{lines_or, non_blank, to_json};
use crate::error::{AppError, AppResult};
use crate::state::{AppConfig, DbState};

/// Customer as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDto {
    pub customer_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub orders_count: usize,
    pub total_spent: f64,
}

impl From<&Customer> for CustomerDto {
    fn from(c: &Customer) -> Self {
        CustomerDto {
            customer_id: c.customer_id().to_string(),
            name: c.name(),
            email: c.email(),
            phone: c.phone(),
            city: c.city().map(str::to_string),
            orders_count: c.order_count(),
            total_spent: c.total_spent(),
        }
    }
}

/// `{id} | {name} | {city}` list entry.
pub fn customer_line(customer: &Customer) -> String {
    format!(
        "{} | {} | {}",
        customer.customer_id(),
        customer.name(),
        customer.city().unwrap_or("-")
    )
}

/// Contact card plus spend.
pub fn customer_card(customer: &Customer, config: &AppConfig) -> String {
    format!(
        "{}\nCity: {}\nTotal spent: {}",
        customer.contact_summary(),
        customer.city().unwrap_or("-"),
        config.money(customer.total_spent())
    )
}

pub async fn run(
    cmd: CustomerCommand,
    state: &mut DbState,
    config: &AppConfig,
    json: bool,
) -> AppResult<String> {
    match cmd {
        CustomerCommand::Add {
            name,
            email,
            phone,
            city,
            id,
        } => {
            let customer = Customer::new(
                name.trim(),
                non_blank(email),
                non_blank(phone),
                non_blank(city),
                non_blank(id),
            )?;
            let customer = state.add_customer(customer).await?;

            if json {
                to_json(&CustomerDto::from(customer.as_ref()))
            } else {
                Ok(format!("Customer added\n{}", customer_line(&customer)))
            }
        }

        CustomerCommand::List => {
            let customers = state.book().customers();
            if json {
                let dtos: Vec<CustomerDto> =
                    customers.iter().map(|c| CustomerDto::from(c.as_ref())).collect();
                to_json(&dtos)
            } else {
                let lines = customers.iter().map(|c| customer_line(c)).collect();
                Ok(lines_or(lines, "(no customers)"))
            }
        }

        CustomerCommand::Show { customer_id } => {
            let customer = state
                .book()
                .customer(&customer_id)
                .ok_or_else(|| AppError::not_found("Customer", &customer_id))?;

            if json {
                to_json(&CustomerDto::from(customer.as_ref()))
            } else {
                Ok(customer_card(customer, config))
            }
        }

        CustomerCommand::Update {
            customer_id,
            email,
            phone,
        } => {
            let (email, phone) = (non_blank(email), non_blank(phone));
            if email.is_none() && phone.is_none() {
                return Err(AppError::validation("Nothing to update: pass --email and/or --phone"));
            }

            let customer = state.update_contact(&customer_id, email, phone).await?;
            if json {
                to_json(&CustomerDto::from(customer.as_ref()))
            } else {
                Ok(format!("Customer updated\n{}", customer.contact_summary()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use order_db::{Database, DbConfig};

    async fn state() -> DbState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        DbState::from_database(db).await.unwrap()
    }

    fn add(name: &str, email: Option<&str>, id: &str) -> CustomerCommand {
        CustomerCommand::Add {
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: None,
            city: Some("  ".to_string()),
            id: Some(id.to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let mut state = state().await;
        let config = AppConfig::default();

        let out = run(add("Ann", Some("ann@example.com"), "C-1"), &mut state, &config, false)
            .await
            .unwrap();
        assert_eq!(out, "Customer added\nC-1 | Ann | -");

        let out = run(CustomerCommand::List, &mut state, &config, false).await.unwrap();
        assert_eq!(out, "C-1 | Ann | -");
    }

    #[tokio::test]
    async fn test_invalid_email_is_validation_error() {
        let mut state = state().await;
        let cmd = add("Ann", Some("ann-at-example"), "C-1");
        let err = run(cmd, &mut state, &AppConfig::default(), false)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Validation error: Invalid email: ann-at-example");
        assert!(state.book().customers().is_empty());
    }

    #[tokio::test]
    async fn test_show_and_json() {
        let mut state = state().await;
        let config = AppConfig::default();
        run(add("Ann", None, "C-1"), &mut state, &config, false).await.unwrap();

        let card = run(
            CustomerCommand::Show { customer_id: "C-1".into() },
            &mut state,
            &config,
            false,
        )
        .await
        .unwrap();
        assert!(card.starts_with("Ann (C-1) — orders: 0 — Ann | email: — | phone: —"));
        assert!(card.ends_with("Total spent: $0.00"));

        let json = run(CustomerCommand::List, &mut state, &config, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["customer_id"], "C-1");
        assert_eq!(value[0]["orders_count"], 0);
    }

    #[tokio::test]
    async fn test_update_requires_a_field() {
        let mut state = state().await;
        let err = run(
            CustomerCommand::Update {
                customer_id: "C-1".into(),
                email: None,
                phone: Some(" ".into()),
            },
            &mut state,
            &AppConfig::default(),
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
