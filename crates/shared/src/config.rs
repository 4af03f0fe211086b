//! Application configuration management.

use std::path::Path;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Report behaviour configuration.
    pub reports: ReportsConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "c4reports=info".to_string()
}

/// Report behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Voucher kinds the ledger statement is restricted to when no
    /// `voucher_type` filter is given.
    pub default_voucher_types: Vec<String>,
    /// Width of each per-day column in the attendance grids.
    pub day_column_width: u32,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_voucher_types: default_voucher_types(),
            day_column_width: default_day_column_width(),
        }
    }
}

fn default_voucher_types() -> Vec<String> {
    vec!["Journal Entry".to_string(), "Payment Entry".to_string()]
}

fn default_day_column_width() -> u32 {
    45
}

impl AppConfig {
    /// Loads configuration from `config/` in the working directory and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Loads configuration from the given directory and the environment.
    ///
    /// Sources, lowest priority first: `{dir}/default`, `{dir}/{RUN_MODE}`,
    /// then `C4REPORTS__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is malformed or a value has the
    /// wrong type.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            .add_source(
                config::Environment::with_prefix("C4REPORTS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("reports.default_voucher_types"),
            )
            .build()?;

        config.try_deserialize()
    }
}
