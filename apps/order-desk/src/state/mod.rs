//! # State Module
//!
//! Application state shared by commands and the interactive form.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppConfig  read-only after startup (file → env → flags)                │
//! │  DbState    Database handle + OrderBook loaded from it                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{config_file_path, AppConfig, ConfigError};
pub use db::DbState;
