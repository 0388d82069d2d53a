//! Configuration for the counter demo
//!
//! This crate provides:
//! - File path utilities for config and log files
//! - Configuration file loading (TOML)
//! - Demo configuration (DemoConfig) including logger middleware options

pub mod config_file;
pub mod demo_config;
pub mod paths;

pub use config_file::load_config_file;
pub use demo_config::{DemoConfig, LoggerConfig};
pub use paths::{app_config_path, cache_dir, config_dir, local_config_path};
