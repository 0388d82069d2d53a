//! Demo configuration
//!
//! Configuration loaded from `.counter-demo.toml` or the global config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counter demo configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DemoConfig {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Counter value before the first action
    #[serde(default)]
    pub initial_count: i64,

    /// Amount added by the "add" action creator
    #[serde(default = "default_step")]
    pub step: i64,

    /// Delay of the deferred decrement, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Logger middleware options
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Logger middleware options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoggerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log the state before and after every action
    #[serde(default = "default_true")]
    pub log_state: bool,

    #[serde(default = "default_logger_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_step() -> i64 {
    1
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_logger_level() -> String {
    "info".to_string()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            log_state: default_true(),
            level: default_logger_level(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            initial_count: 0,
            step: default_step(),
            delay_ms: default_delay_ms(),
            logger: LoggerConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load config from CWD first, then the config directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded demo config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("{:#}", e);
                }
            }
        }

        log::debug!("Using default demo config");
        Self::default()
    }

    /// Parse a TOML document
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Delay of the deferred decrement
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
