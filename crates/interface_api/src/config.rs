//! API configuration
//!
//! Loaded from `API_*` environment variables (a `.env` file is read first by
//! the server binary). Anything not set falls back to [`ApiConfig::default`].

use std::str::FromStr;

use serde::Deserialize;

use core_kernel::{CoreError, Timezone};

/// Longest trailing window the trends endpoint accepts
pub const MAX_TREND_MONTHS: u32 = 24;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// IANA timezone used to decide what "this month" means
    pub timezone: String,
    /// Months covered by the trends endpoint when the request does not say
    pub default_trend_months: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/room_ledger".to_string(),
            log_level: "info".to_string(),
            timezone: "UTC".to_string(),
            default_trend_months: 6,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed timezone
    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        Timezone::from_str(&self.timezone).map_err(CoreError::from)
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.database_url.trim().is_empty() {
            return Err(CoreError::configuration("database_url must not be empty"));
        }
        if !(1..=MAX_TREND_MONTHS).contains(&self.default_trend_months) {
            return Err(CoreError::configuration(format!(
                "default_trend_months must be between 1 and {MAX_TREND_MONTHS}, got {}",
                self.default_trend_months
            )));
        }
        self.timezone()?;
        Ok(())
    }
}
