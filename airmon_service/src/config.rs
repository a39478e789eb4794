/// Service configuration loaded from `airmon.toml`.
///
/// Every section is optional; an empty file yields the built-in defaults.
///
/// ```toml
/// [logging]
/// level = "info"
/// file = "airmon.log"
/// timestamps = true
///
/// [freshness]
/// max_age_minutes = 60
///
/// [thresholds.pm25]
/// moderate = 12.1
/// unhealthy_sensitive = 35.5
/// unhealthy = 55.5
/// very_unhealthy = 150.5
/// hazardous = 250.5
/// ```
///
/// Threshold sections replace the built-in boundaries for that channel. The
/// merged table goes through the same validation as the built-in one.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::alert::stalenesses::DEFAULT_MAX_AGE_MINUTES;
use crate::logging::LogLevel;
use crate::model::{Channel, ConfigError, TierBoundaries};
use crate::thresholds::ThresholdTable;

/// Env var naming the config file.
pub const CONFIG_ENV_VAR: &str = "AIRMON_CONFIG";

/// Config file used when `AIRMON_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "./airmon.toml";

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub logging: LoggingConfig,
    pub freshness: FreshnessConfig,
    /// Per-channel boundary overrides, keyed by channel name.
    pub thresholds: BTreeMap<String, TierBoundaries>,
    /// File this config was read from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            timestamps: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FreshnessConfig {
    pub max_age_minutes: u64,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ServiceConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parsed log level, rejecting unknown names.
    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.logging.level.parse().map_err(ConfigError::Parse)
    }

    /// Builds the threshold table: built-in boundaries with overrides applied.
    pub fn threshold_table(&self) -> Result<ThresholdTable, ConfigError> {
        let mut table = ThresholdTable::standard();
        for (name, boundaries) in &self.thresholds {
            let channel: Channel = name.parse().map_err(ConfigError::Parse)?;
            table = table.with_channel(channel, *boundaries)?;
        }
        Ok(table)
    }
}

/// Reads and parses the config file at `path`.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
    let mut config = ServiceConfig::from_toml_str(&text)?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

/// Config path from `AIRMON_CONFIG`, or `None` when unset.
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)
}

/// Resolves and loads the service config.
///
/// An explicitly configured path must exist. The default path is optional;
/// when it is missing the built-in defaults are used and `source` is `None`.
/// Nothing is logged here because the logger is configured from the result.
pub fn load_service_config(explicit: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                Ok(ServiceConfig::default())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
