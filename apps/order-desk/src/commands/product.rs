//! # Product Commands

use order_core::Product;
use serde::Serialize;

use crate::cli::ProductCommand;
use crate::commands::{lines_or, non_blank, to_json};
use crate::error::AppResult;
use crate::state::{AppConfig, DbState};

/// Product as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
    pub sku: String,
    pub name: String,
    pub price: f64,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            sku: p.sku().to_string(),
            name: p.name().to_string(),
            price: p.price(),
        }
    }
}

/// `{sku} | {name} | {price}` list entry.
pub fn product_line(product: &Product, config: &AppConfig) -> String {
    format!(
        "{} | {} | {}",
        product.sku(),
        product.name(),
        config.money(product.price())
    )
}

pub async fn run(
    cmd: ProductCommand,
    state: &mut DbState,
    config: &AppConfig,
    json: bool,
) -> AppResult<String> {
    match cmd {
        ProductCommand::Add { name, price, sku } => {
            let product = Product::new(name.trim(), price, non_blank(sku))?;
            let product = state.add_product(product).await?;

            if json {
                to_json(&ProductDto::from(product.as_ref()))
            } else {
                Ok(format!("Product added\n{}", product_line(&product, config)))
            }
        }

        ProductCommand::List => {
            let products = state.book().products();
            if json {
                let dtos: Vec<ProductDto> =
                    products.iter().map(|p| ProductDto::from(p.as_ref())).collect();
                to_json(&dtos)
            } else {
                let lines = products.iter().map(|p| product_line(p, config)).collect();
                Ok(lines_or(lines, "(no products)"))
            }
        }
    }
}
