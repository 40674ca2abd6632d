//! Configuration for the `snfctl` tool.
//!
//! Read from a `key = value` file, then overridden by environment variables.

use std::path::Path;

use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "/etc/snfctl.conf";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_PORT: u32 = 0;
const DEFAULT_NUM_RINGS: i32 = 1;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid {key}: {value}")]
    Invalid { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_filter: String,
    /// SNF port used by commands that open a device
    pub port: u32,
    /// Receive rings requested when opening a device
    pub num_rings: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            port: DEFAULT_PORT,
            num_rings: DEFAULT_NUM_RINGS,
        }
    }
}

impl Config {
    /// Load from `SNFCTL_CONFIG` (or the default path) plus env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("SNFCTL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::parse(&std::fs::read_to_string(&config_path)?)?
        } else {
            Self::default()
        };

        // Allow environment variable overrides
        if let Ok(val) = std::env::var("SNFCTL_LOG") {
            config.log_filter = val;
        }
        if let Ok(val) = std::env::var("SNFCTL_PORT") {
            config.port = parse_value("SNFCTL_PORT", &val)?;
        }
        if let Ok(val) = std::env::var("SNFCTL_RINGS") {
            config.num_rings = parse_value("SNFCTL_RINGS", &val)?;
        }

        Ok(config)
    }

    /// Parse config file contents. Unknown keys are ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();
                match key {
                    "log_filter" => config.log_filter = value.to_string(),
                    "port" => config.port = parse_value(key, value)?,
                    "num_rings" => config.num_rings = parse_value(key, value)?,
                    _ => tracing::debug!("ignoring unknown config key: {}", key),
                }
            }
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    })
}
