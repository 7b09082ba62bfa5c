//! Logging setup.
//!
//! Everything logs through the `log` macros. [`init`] installs a `fern`
//! dispatcher that feeds the in-app [`Logger`] (shown in the logs panel) and,
//! when enabled, a log file in the data directory. Nothing goes to stdout
//! because the terminal is in raw mode while the UI runs.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Shared in-memory log buffer that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    max_entries: usize,
}

impl Logger {
    pub fn new(max_entries: usize) -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            max_entries: max_entries.max(1),
        }
    }

    /// Add a log entry, dropping the oldest one when full
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == self.max_entries {
                logs.pop_front();
            }
            logs.push_back(formatted_message);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        match self.logs.lock() {
            Ok(logs) => logs.iter().rev().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.logs.lock().map(|logs| logs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Path of the log file written when file logging is enabled
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::cache_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("chatlist").join("chatlist.log"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggingConfig::default().max_entries)
    }
}

/// Build the dispatcher without installing it.
pub fn dispatch(config: &LoggingConfig, logger: &Logger) -> Result<fern::Dispatch> {
    let memory = logger.clone();
    let mut dispatch = fern::Dispatch::new()
        .level(config.level_filter())
        .chain(fern::Output::call(move |record| {
            memory.log(format!("{} {}", record.level(), record.args()));
        }));

    if config.enabled {
        let path = Logger::get_log_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} {:<5} [{}] {}",
                        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(file),
        );
    }

    Ok(dispatch)
}

/// Install the global logger. Fails if one is already installed.
pub fn init(config: &LoggingConfig, logger: &Logger) -> Result<()> {
    dispatch(config, logger)?
        .apply()
        .context("Failed to install logger")?;
    Ok(())
}
