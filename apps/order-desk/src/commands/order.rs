//! # Order Commands

use std::rc::Rc;

use chrono::{DateTime, Utc};
use order_core::sort::{by_created_at, by_customer_id, by_total_cost};
use order_core::{sort_orders, Contactable, Order};
use serde::Serialize;

use crate::cli::{OrderCommand, SortKey};
use crate::commands::{lines_or, to_json};
use crate::error::AppResult;
use crate::state::{AppConfig, DbState};

/// One order line as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDto {
    pub sku: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub cost: f64,
}

/// Order as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDto {
    pub order_id: String,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
    pub total: f64,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        let items = order
            .items()
            .iter()
            .map(|item| OrderItemDto {
                sku: item.product().sku().to_string(),
                name: item.product().name().to_string(),
                unit_price: item.product().price(),
                quantity: item.quantity(),
                cost: item.cost(),
            })
            .collect();

        OrderDto {
            order_id: order.order_id().to_string(),
            customer_id: order.customer_id().to_string(),
            created_at: order.created_at(),
            items,
            total: order.total_cost(),
        }
    }
}

/// `{id} | {date} | {customer} | {total}` list entry.
pub fn order_line(order: &Order, config: &AppConfig) -> String {
    let customer = order
        .customer()
        .map(|c| c.name())
        .unwrap_or_else(|| order.customer_id().to_string());

    format!(
        "{} | {} | {} | {}",
        order.order_id(),
        order.created_at().format("%Y-%m-%d %H:%M"),
        customer,
        config.money(order.total_cost())
    )
}

/// Orders sorted by the chosen key.
pub fn sorted(orders: &[Rc<Order>], key: SortKey, desc: bool) -> Vec<Rc<Order>> {
    match key {
        SortKey::Date => sort_orders(orders, by_created_at, desc),
        SortKey::Total => sort_orders(orders, by_total_cost, desc),
        SortKey::Customer => sort_orders(orders, by_customer_id, desc),
    }
}

pub async fn run(
    cmd: OrderCommand,
    state: &mut DbState,
    config: &AppConfig,
    json: bool,
) -> AppResult<String> {
    match cmd {
        OrderCommand::Create {
            customer,
            sku,
            quantity,
        } => {
            let order = state
                .create_order(customer.trim(), sku.trim(), quantity)
                .await?;

            if json {
                to_json(&OrderDto::from(order.as_ref()))
            } else {
                Ok(format!("Order created\n{}", order_line(&order, config)))
            }
        }

        OrderCommand::List { sort, desc } => {
            let orders = sorted(state.book().orders(), sort, desc);
            if json {
                let dtos: Vec<OrderDto> =
                    orders.iter().map(|o| OrderDto::from(o.as_ref())).collect();
                to_json(&dtos)
            } else {
                let lines = orders.iter().map(|o| order_line(o, config)).collect();
                Ok(lines_or(lines, "(no orders)"))
            }
        }
    }
}
