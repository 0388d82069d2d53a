//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory
//! - Release builds: cache directory (~/.cache/counter-demo/ on Linux)

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("counter-demo-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        tiny_redux_config::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

/// Parse a level name, `None` for anything unknown
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Initialize file-based logging
///
/// `RUST_LOG` wins over `default_level`. Returns the path of the log file.
pub fn init(default_level: &str) -> Result<PathBuf> {
    let log_file = log_file_path();

    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| parse_level(&v))
        .or_else(|| parse_level(default_level))
        .unwrap_or(LevelFilter::Debug);

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c)
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

/// Restores the default panic hook when dropped, see [`route_panics`]
pub struct PanicHookGuard;

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        drop(std::panic::take_hook());
    }
}

/// Send panic messages to `sink` instead of stderr until the guard is dropped
///
/// Keeps panics caught inside the store (listeners) from writing over the
/// terminal UI.
pub fn route_panics<F>(sink: F) -> PanicHookGuard
where
    F: Fn(String) + Send + Sync + 'static,
{
    std::panic::set_hook(Box::new(move |info| sink(info.to_string())));
    PanicHookGuard
}
