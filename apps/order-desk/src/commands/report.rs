//! # Report Commands
//!
//! Read-only views over the order book. Unlike the other handlers these
//! never touch the database, so they are plain functions.

use std::fmt::Write as _;

use order_core::report::{
    orders_over_time, render_orders_over_time, top_customers_by_orders, top_products_by_quantity,
    CustomerProductGraph, GraphEdge, NodeKind,
};
use order_core::{Contactable, OrderBook};
use serde::Serialize;

use crate::cli::ReportCommand;
use crate::commands::to_json;
use crate::error::AppResult;
use crate::state::AppConfig;

/// A ranked customer with the name resolved from the book.
#[derive(Debug, Clone, Serialize)]
pub struct TopCustomerDto {
    pub customer_id: String,
    pub name: Option<String>,
    pub orders_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNodeDto {
    pub name: String,
    pub kind: NodeKind,
}

/// Graph report as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphDto {
    pub nodes: Vec<GraphNodeDto>,
    pub edges: Vec<GraphEdge>,
}

pub fn run(
    cmd: &ReportCommand,
    book: &OrderBook,
    config: &AppConfig,
    json: bool,
) -> AppResult<String> {
    let orders = book.orders();

    match cmd {
        ReportCommand::TopCustomers { n } => {
            let ranked = top_customers_by_orders(orders, n.unwrap_or(config.top_n));
            let rows: Vec<TopCustomerDto> = ranked
                .into_iter()
                .map(|row| TopCustomerDto {
                    name: book.customer(&row.customer_id).map(|c| c.name()),
                    customer_id: row.customer_id,
                    orders_count: row.orders_count,
                })
                .collect();

            if json {
                return to_json(&rows);
            }
            let mut out = String::from("Top customers by orders\n");
            if rows.is_empty() {
                out.push_str("(no orders)\n");
            }
            for (rank, row) in rows.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>2}. {} | {} | {}",
                    rank + 1,
                    row.customer_id,
                    row.name.as_deref().unwrap_or("-"),
                    row.orders_count
                );
            }
            Ok(out)
        }

        ReportCommand::Timeline => {
            let series = orders_over_time(orders);
            if json {
                to_json(&series)
            } else {
                Ok(render_orders_over_time(&series, config.chart_width))
            }
        }

        ReportCommand::TopProducts { k } => {
            let rows = top_products_by_quantity(orders, k.unwrap_or(config.top_n));
            if json {
                return to_json(&rows);
            }
            let mut out = String::from("Top products by quantity\n");
            if rows.is_empty() {
                out.push_str("(no orders)\n");
            }
            for (rank, row) in rows.iter().enumerate() {
                let name = book.product(&row.sku).map(|p| p.name()).unwrap_or("-");
                let _ = writeln!(out, "{:>2}. {} | {} | {}", rank + 1, row.sku, name, row.quantity);
            }
            Ok(out)
        }

        ReportCommand::Graph => {
            let graph = CustomerProductGraph::build(orders);
            let edges = graph.edges();
            if json {
                let nodes = graph
                    .nodes()
                    .map(|(name, kind)| GraphNodeDto { name: name.to_string(), kind })
                    .collect();
                return to_json(&GraphDto { nodes, edges });
            }
            let mut out = format!(
                "Customer-product graph: {} nodes, {} edges\n",
                graph.node_count(),
                graph.edge_count()
            );
            for edge in &edges {
                let _ = writeln!(out, "{} -- {} ({})", edge.customer, edge.product, edge.weight);
            }
            Ok(out)
        }
    }
}
