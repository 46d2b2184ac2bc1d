//! # Commands Module
//!
//! Handlers behind each subcommand. Every handler returns the text to print
//! (plain or JSON), so the same handlers back the interactive form.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch, shared helpers)
//! ├── customer.rs  ◄─── customer add | list | show | update
//! ├── product.rs   ◄─── product add | list
//! ├── order.rs     ◄─── order create | list
//! └── report.rs    ◄─── report top-customers | timeline | top-products | graph
//! ```

pub mod customer;
pub mod order;
pub mod product;
pub mod report;

use serde::Serialize;

use crate::cli::Commands;
use crate::error::AppResult;
use crate::state::{AppConfig, DbState};

/// Runs one subcommand and returns its output.
pub async fn execute(
    command: Commands,
    state: &mut DbState,
    config: &AppConfig,
    json: bool,
) -> AppResult<String> {
    match command {
        Commands::Customer(cmd) => customer::run(cmd, state, config, json).await,
        Commands::Product(cmd) => product::run(cmd, state, config, json).await,
        Commands::Order(cmd) => order::run(cmd, state, config, json).await,
        Commands::Report(cmd) => report::run(&cmd, state.book(), config, json),
    }
}

/// Treats a missing or blank optional field as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pretty JSON for `--json` output.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One line per entry, or a placeholder when empty.
pub(crate) fn lines_or(lines: Vec<String>, empty: &str) -> String {
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Riga ".to_string())).as_deref(), Some("Riga"));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_lines_or() {
        assert_eq!(lines_or(Vec::new(), "(none)"), "(none)");
        assert_eq!(lines_or(vec!["a".into(), "b".into()], "(none)"), "a\nb");
    }
}
