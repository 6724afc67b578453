//! Configuration management for the Biblion server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::services::fees::FeeModel;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Circulation policy: loan term, per-member bounds and fee strategy
#[derive(Debug, Deserialize, Clone)]
pub struct CirculationConfig {
    /// Loan term in days, added to the borrow date to obtain the due date
    pub borrow_days: i64,
    /// Maximum number of items a member may hold at once
    pub max_borrows: usize,
    /// Maximum number of renewals per loan
    pub max_renewals: u32,
    /// Late-fee strategy applied on return
    pub fee_model: FeeModel,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub circulation: CirculationConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BIBLION_)
            .add_source(
                Environment::with_prefix("BIBLION")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for CirculationConfig {
    fn default() -> Self {
        Self {
            borrow_days: 14,
            max_borrows: 5,
            max_renewals: 2,
            fee_model: FeeModel::Linear,
        }
    }
}
