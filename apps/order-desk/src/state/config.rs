//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--db`)
//! 2. Environment variables (`ORDER_DESK_*`)
//! 3. Config file (`<config dir>/order-desk.toml`)
//! 4. Defaults (this file)
//!
//! ```toml
//! # order-desk.toml
//! database_path = "/srv/orders/orders.db"
//! currency_symbol = "€"
//! top_n = 10
//! chart_width = 50
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const ENV_DB_PATH: &str = "ORDER_DESK_DB_PATH";
pub const ENV_CURRENCY: &str = "ORDER_DESK_CURRENCY";
pub const ENV_TOP_N: &str = "ORDER_DESK_TOP_N";

const CONFIG_FILE: &str = "order-desk.toml";
const DATABASE_FILE: &str = "orders.db";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file.
    /// Default: `<data dir>/orders.db`
    pub database_path: PathBuf,

    /// Prefix for money amounts.
    pub currency_symbol: String,

    /// Rows shown by ranked reports unless `-n`/`-k` is given.
    pub top_n: usize,

    /// Width of the longest bar in the timeline chart.
    pub chart_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: default_database_path(),
            currency_symbol: "$".to_string(),
            top_n: order_core::DEFAULT_TOP_N,
            chart_width: 40,
        }
    }
}

impl AppConfig {
    /// Loads the config file (if any), then environment, then `db_override`.
    pub fn load(db_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading config file");
                Self::from_file(&path)?
            }
            _ => AppConfig::default(),
        };

        config.apply_env(|var| std::env::var(var).ok())?;

        if let Some(path) = db_override {
            config.database_path = path;
        }

        debug!(?config, "Configuration resolved");
        Ok(config)
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses TOML config text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Applies `ORDER_DESK_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(symbol) = lookup(ENV_CURRENCY) {
            self.currency_symbol = symbol;
        }
        if let Some(value) = lookup(ENV_TOP_N) {
            self.top_n = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TOP_N.to_string(),
                value,
            })?;
        }
        Ok(())
    }

    /// Creates the directory holding the database file.
    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        match self.database_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }

    /// Formats an amount with the configured currency symbol.
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "orderdesk", "order-desk")
}

/// `<config dir>/order-desk.toml`, when a home directory is known.
pub fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}
