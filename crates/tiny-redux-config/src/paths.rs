//! Configuration and log directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/counter-demo/`, `~/.cache/counter-demo/`
//! - macOS: `~/Library/Application Support/counter-demo/`, `~/Library/Caches/counter-demo/`
//! - Windows: `%APPDATA%\counter-demo\`, `%LOCALAPPDATA%\counter-demo\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "counter-demo";
const LOCAL_CONFIG_FILE: &str = ".counter-demo.toml";

/// Get the application config directory (not created)
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
    Ok(dir)
}

/// Get path to the config file in the current directory
pub fn local_config_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(LOCAL_CONFIG_FILE))
}

/// Get path to the global config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
