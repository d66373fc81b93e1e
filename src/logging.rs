//! File logging
//!
//! The terminal is owned by the UI, so log records go to
//! `$HOME/.datagrid/datagrid.log` (or `./datagrid.log` without a home).
//! `DATAGRID_LOG` overrides the level, e.g. `DATAGRID_LOG=trace`.

use crate::config::Config;
use anyhow::{Context, Result};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;
use std::str::FromStr;

pub const LOG_FILE_NAME: &str = "datagrid.log";

pub fn log_path() -> PathBuf {
    Config::config_dir()
        .map(|dir| dir.join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Debug)
}

/// Install the global file logger and return the path written to
pub fn init() -> Result<PathBuf> {
    let path = log_path();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let log_file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let level = level_from(env::var("DATAGRID_LOG").ok().as_deref());
    WriteLogger::init(level, LogConfig::default(), log_file)
        .context("Failed to initialize logger")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env_value() {
        assert_eq!(level_from(None), LevelFilter::Debug);
        assert_eq!(level_from(Some("warn")), LevelFilter::Warn);
        assert_eq!(level_from(Some(" TRACE ")), LevelFilter::Trace);
        assert_eq!(level_from(Some("loud")), LevelFilter::Debug);
    }

    #[test]
    fn test_log_path_file_name() {
        assert!(log_path().ends_with(LOG_FILE_NAME));
    }
}
