use crate::phase::UnknownStatusPolicy;
use dotenvy::dotenv;
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Request channel capacity of each table.
    pub table_buffer: usize,
    /// How an unrecognized order status is rendered.
    pub unknown_status: UnknownStatusPolicy,
    /// Seed demo canteens and menus on startup.
    pub seed_demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table_buffer: 32,
            unknown_status: UnknownStatusPolicy::Explicit,
            seed_demo: true,
        }
    }
}

impl AppConfig {
    /// Reads `CANTEEN_*` variables, loading `.env` first if present. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let table_buffer = match lookup("CANTEEN_TABLE_BUFFER") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => return Err(invalid("CANTEEN_TABLE_BUFFER", "must be greater than zero")),
                Ok(n) => n,
                Err(e) => return Err(invalid("CANTEEN_TABLE_BUFFER", e)),
            },
            None => defaults.table_buffer,
        };
        let unknown_status = match lookup("CANTEEN_UNKNOWN_STATUS") {
            Some(raw) => raw.parse::<UnknownStatusPolicy>().map_err(|e: String| invalid("CANTEEN_UNKNOWN_STATUS", e))?,
            None => defaults.unknown_status,
        };
        let seed_demo = match lookup("CANTEEN_SEED_DEMO") {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|e| invalid("CANTEEN_SEED_DEMO", e))?,
            None => defaults.seed_demo,
        };

        tracing::info!(table_buffer, ?unknown_status, seed_demo, "Configuration loaded");
        Ok(Self {
            table_buffer,
            unknown_status,
            seed_demo,
        })
    }
}

fn invalid(var: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        reason: reason.to_string(),
    }
}
