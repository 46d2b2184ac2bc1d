//! # Reports
//!
//! Aggregations over placed orders.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  &[Rc<Order>]                                                           │
//! │     ├──► top_customers_by_orders ──► [CustomerOrderCount]               │
//! │     ├──► orders_over_time ─────────► [DailyOrderCount] ──► text chart   │
//! │     ├──► top_products_by_quantity ─► [ProductSales]                     │
//! │     └──► CustomerProductGraph ─────► c:{id} ── weight ── p:{sku}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ranked reports are sorted by descending value; ties keep the order in
//! which the key first appeared.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::rc::Rc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::order::Order;

// =============================================================================
// Report Rows
// =============================================================================

/// Number of orders placed by one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerOrderCount {
    pub customer_id: String,
    pub orders_count: usize,
}

/// Number of orders placed on one (UTC) day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyOrderCount {
    pub date: NaiveDate,
    pub orders: usize,
}

/// Total quantity sold of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub sku: String,
    pub quantity: i64,
}

// =============================================================================
// Rankings
// =============================================================================

/// Top `n` customers by number of orders.
pub fn top_customers_by_orders(orders: &[Rc<Order>], n: usize) -> Vec<CustomerOrderCount> {
    let counts = tally(
        orders
            .iter()
            .filter(|o| !o.customer_id().is_empty())
            .map(|o| (o.customer_id().to_string(), 1_usize)),
    );

    counts
        .into_iter()
        .take(n)
        .map(|(customer_id, orders_count)| CustomerOrderCount {
            customer_id,
            orders_count,
        })
        .collect()
}

/// Top `k` products by total quantity across all order items.
pub fn top_products_by_quantity(orders: &[Rc<Order>], k: usize) -> Vec<ProductSales> {
    let totals = tally(orders.iter().flat_map(|o| o.items()).filter_map(|item| {
        let sku = item.product().sku();
        (!sku.is_empty()).then(|| (sku.to_string(), item.quantity()))
    }));

    totals
        .into_iter()
        .take(k)
        .map(|(sku, quantity)| ProductSales { sku, quantity })
        .collect()
}

/// Sums values per key, then ranks descending (ties by first appearance).
fn tally<V>(entries: impl Iterator<Item = (String, V)>) -> Vec<(String, V)>
where
    V: Copy + Ord + std::ops::AddAssign,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<(String, V)> = Vec::new();

    for (key, value) in entries {
        match slots.get(&key) {
            Some(&slot) => totals[slot].1 += value,
            None => {
                slots.insert(key.clone(), totals.len());
                totals.push((key, value));
            }
        }
    }

    // stable: equal totals stay in first-seen order
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

// =============================================================================
// Orders Over Time
// =============================================================================

/// Orders per calendar day (UTC), ascending by date.
pub fn orders_over_time(orders: &[Rc<Order>]) -> Vec<DailyOrderCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for order in orders {
        *per_day.entry(order.created_at().date_naive()).or_default() += 1;
    }

    per_day
        .into_iter()
        .map(|(date, orders)| DailyOrderCount { date, orders })
        .collect()
}

/// Renders a daily series as a horizontal bar chart.
///
/// The longest bar is `width` characters wide.
///
/// ```text
/// Orders over time
/// Date        | Number of orders
/// 2024-05-01  | ████████ 4
/// 2024-05-02  | ██ 1
/// ```
pub fn render_orders_over_time(series: &[DailyOrderCount], width: usize) -> String {
    let mut out = String::from("Orders over time\n");
    if series.is_empty() {
        out.push_str("(no orders)\n");
        return out;
    }

    let _ = writeln!(out, "{:<11} | Number of orders", "Date");
    let max = series.iter().map(|d| d.orders).max().unwrap_or(1).max(1);
    for day in series {
        let date = day.date.format("%Y-%m-%d").to_string();
        let bar = (day.orders * width).div_ceil(max);
        let _ = writeln!(out, "{:<11} | {} {}", date, "█".repeat(bar), day.orders);
    }
    out
}

// =============================================================================
// Customer-Product Graph
// =============================================================================

/// Kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Customer,
    Product,
}

/// An undirected edge with its accumulated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub customer: String,
    pub product: String,
    pub weight: i64,
}

/// Bipartite graph of who bought what.
///
/// Customers are `c:{customer_id}`, products are `p:{sku}`. An edge's weight
/// is the total quantity that customer ordered of that product.
#[derive(Debug, Clone, Default)]
pub struct CustomerProductGraph {
    nodes: BTreeMap<String, NodeKind>,
    edges: BTreeMap<(String, String), i64>,
}

impl CustomerProductGraph {
    /// Builds the graph from orders. Orders without a customer id and items
    /// without a SKU are skipped.
    pub fn build(orders: &[Rc<Order>]) -> Self {
        let mut graph = CustomerProductGraph::default();

        for order in orders {
            if order.customer_id().is_empty() {
                continue;
            }
            let customer = customer_node(order.customer_id());
            graph.nodes.insert(customer.clone(), NodeKind::Customer);

            for item in order.items() {
                let sku = item.product().sku();
                if sku.is_empty() {
                    continue;
                }
                let product = product_node(sku);
                graph.nodes.insert(product.clone(), NodeKind::Product);
                *graph
                    .edges
                    .entry((customer.clone(), product))
                    .or_default() += item.quantity();
            }
        }

        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Kind of a node, if present.
    pub fn node_kind(&self, node: &str) -> Option<NodeKind> {
        self.nodes.get(node).copied()
    }

    /// Nodes with their kinds, sorted by name.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, NodeKind)> {
        self.nodes.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Edge weight between a customer and a product.
    pub fn weight(&self, customer_id: &str, sku: &str) -> Option<i64> {
        self.edges
            .get(&(customer_node(customer_id), product_node(sku)))
            .copied()
    }

    /// Nodes adjacent to `node`.
    pub fn neighbors(&self, node: &str) -> Vec<&str> {
        self.edges
            .keys()
            .filter_map(|(c, p)| {
                if c == node {
                    Some(p.as_str())
                } else if p == node {
                    Some(c.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn edges(&self) -> Vec<GraphEdge> {
        self.edges
            .iter()
            .map(|((customer, product), weight)| GraphEdge {
                customer: customer.clone(),
                product: product.clone(),
                weight: *weight,
            })
            .collect()
    }
}

fn customer_node(customer_id: &str) -> String {
    format!("c:{customer_id}")
}

fn product_node(sku: &str) -> String {
    format!("p:{sku}")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::customer::Customer;
    use crate::order::OrderItem;
    use crate::product::Product;

    struct Fixture {
        _customers: Vec<Rc<Customer>>,
        orders: Vec<Rc<Order>>,
    }

    fn fixture() -> Fixture {
        let ann = Rc::new(Customer::new("Ann", None, None, None, Some("A".into())).unwrap());
        let bob = Rc::new(Customer::new("Bob", None, None, None, Some("B".into())).unwrap());
        let tea = Rc::new(Product::new("Tea", 3.0, Some("TEA".into())).unwrap());
        let mug = Rc::new(Product::new("Mug", 8.0, Some("MUG".into())).unwrap());

        let day = |d: u32, h: u32| Some(Utc.with_ymd_and_hms(2024, 5, d, h, 0, 0).unwrap());
        let item = |p: &Rc<Product>, q: i64| OrderItem::new(Rc::clone(p), q).unwrap();

        let orders = vec![
            Order::new(&bob, vec![item(&tea, 1)], day(1, 9), None),
            Order::new(&ann, vec![item(&tea, 2), item(&mug, 1)], day(1, 15), None),
            Order::new(&ann, vec![item(&mug, 1)], day(2, 10), None),
            Order::new(&bob, vec![item(&tea, 4)], day(3, 11), None),
            Order::new(&ann, vec![item(&tea, 1)], day(3, 23), None),
        ];

        Fixture {
            _customers: vec![ann, bob],
            orders,
        }
    }

    #[test]
    fn test_top_customers_by_orders() {
        let f = fixture();
        let top = top_customers_by_orders(&f.orders, 5);
        assert_eq!(
            top,
            vec![
                CustomerOrderCount { customer_id: "A".into(), orders_count: 3 },
                CustomerOrderCount { customer_id: "B".into(), orders_count: 2 },
            ]
        );
        assert_eq!(top_customers_by_orders(&f.orders, 1).len(), 1);
        assert!(top_customers_by_orders(&[], 5).is_empty());
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let f = fixture();
        let top = top_customers_by_orders(&f.orders[..2], 5);
        assert_eq!(top[0].customer_id, "B");
        assert_eq!(top[1].customer_id, "A");
    }

    #[test]
    fn test_top_products_by_quantity() {
        let f = fixture();
        let top = top_products_by_quantity(&f.orders, 5);
        assert_eq!(
            top,
            vec![
                ProductSales { sku: "TEA".into(), quantity: 8 },
                ProductSales { sku: "MUG".into(), quantity: 2 },
            ]
        );
    }

    #[test]
    fn test_orders_over_time() {
        let f = fixture();
        let series = orders_over_time(&f.orders);
        let counts: Vec<(String, usize)> = series
            .iter()
            .map(|d| (d.date.to_string(), d.orders))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("2024-05-01".to_string(), 2),
                ("2024-05-02".to_string(), 1),
                ("2024-05-03".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_render_orders_over_time() {
        let f = fixture();
        let chart = render_orders_over_time(&orders_over_time(&f.orders), 4);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Orders over time");
        assert_eq!(lines[2], "2024-05-01  | ████ 2");
        assert_eq!(lines[3], "2024-05-02  | ██ 1");

        assert_eq!(render_orders_over_time(&[], 10), "Orders over time\n(no orders)\n");
    }

    #[test]
    fn test_customer_product_graph() {
        let f = fixture();
        let graph = CustomerProductGraph::build(&f.orders);

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.weight("A", "TEA"), Some(3));
        assert_eq!(graph.weight("B", "TEA"), Some(5));
        assert_eq!(graph.weight("B", "MUG"), None);
        assert_eq!(graph.node_kind("c:A"), Some(NodeKind::Customer));
        assert_eq!(graph.node_kind("p:MUG"), Some(NodeKind::Product));

        let nodes: Vec<(&str, NodeKind)> = graph.nodes().collect();
        assert_eq!(
            nodes,
            [
                ("c:A", NodeKind::Customer),
                ("c:B", NodeKind::Customer),
                ("p:MUG", NodeKind::Product),
                ("p:TEA", NodeKind::Product),
            ]
        );

        let mut neighbors = graph.neighbors("p:TEA");
        neighbors.sort();
        assert_eq!(neighbors, ["c:A", "c:B"]);
    }

    #[test]
    fn test_report_rows_serialize() {
        let row = ProductSales { sku: "TEA".into(), quantity: 8 };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"sku":"TEA","quantity":8}"#
        );
    }
}
