//! Service settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `fleet-metrics.toml`, then `FLEET_METRICS__*` environment variables
//! (`__` separates nested keys, e.g. `FLEET_METRICS__ENGINE__GAP_THRESHOLD_MS`).

use crate::rate_limit::RateLimitConfig;
use config::{Config, ConfigError, Environment, File};
use data_validator::TimestampPolicy;
use metrics_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::Level;

pub const DEFAULT_CONFIG_FILE: &str = "fleet-metrics.toml";
pub const ENV_PREFIX: &str = "FLEET_METRICS";

/// Service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Listen address
    pub bind_addr: String,
    /// trace, debug, info, warn or error
    pub log_level: String,
    /// Emit JSON log lines
    pub json_logs: bool,
    pub rate_limit: RateLimitConfig,
    pub engine: EngineConfig,
    /// Default handling of samples without timestamp
    pub timestamp_policy: TimestampPolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            rate_limit: RateLimitConfig::default(),
            engine: EngineConfig::default(),
            timestamp_policy: TimestampPolicy::default(),
        }
    }
}

impl ServiceSettings {
    /// Load from the default file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from a specific file (optional) and environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parsed log level, INFO when unrecognised
    pub fn log_level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or(Level::INFO)
    }
}
