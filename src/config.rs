//! Configuration management for chatlist
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{CONFIG_GENERATED, LIST_DEFAULT_WIDTH, LIST_MAX_WIDTH, LIST_MIN_WIDTH};
use crate::icons::IconTheme;
use crate::menu::MenuPolicy;
use crate::selection::SelectionPolicy;
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub menu: MenuPolicy,
    pub selection: SelectionConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable mouse support (click to select, right-click for the context menu)
    pub mouse_enabled: bool,
    /// Conversation list width in columns
    pub list_width: u16,
    /// Date format for previews older than a week
    pub date_format: String,
    /// Icon set used for dialog kinds and flags
    pub icon_theme: IconTheme,
}

/// Selection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectionConfig {
    /// What to select when the selected dialog is removed: "advance" or "clear"
    pub on_remove: SelectionPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file in the data directory
    pub enabled: bool,
    /// Minimum level written to the log file
    pub level: String,
    /// Number of recent log lines kept for the in-app logs panel
    pub max_entries: usize,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of generated conversations when no dialogs file is given
    pub demo_dialogs: usize,
    /// Milliseconds between simulated incoming messages (0 = disabled)
    pub activity_interval_ms: u64,
    /// JSON file with the initial dialogs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialogs_file: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
            list_width: LIST_DEFAULT_WIDTH,
            date_format: datetime::DEFAULT_DATE_FORMAT.to_string(),
            icon_theme: IconTheme::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            max_entries: 500,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            demo_dialogs: 12,
            activity_interval_ms: 2500,
            dialogs_file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed log level, falling back to `Info` for unknown values
    pub fn level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.level).unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file();

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("chatlist.toml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        // 2. Check XDG config directory
        let xdg_config = dirs::config_dir()?.join("chatlist").join("config.toml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ui.list_width < LIST_MIN_WIDTH || self.ui.list_width > LIST_MAX_WIDTH {
            anyhow::bail!(
                "list_width must be between {} and {} columns, got {}",
                LIST_MIN_WIDTH,
                LIST_MAX_WIDTH,
                self.ui.list_width
            );
        }

        if !datetime::is_valid_format(&self.ui.date_format) {
            anyhow::bail!("Invalid date_format '{}'", self.ui.date_format);
        }

        if log::LevelFilter::from_str(&self.logging.level).is_err() {
            anyhow::bail!(
                "Invalid logging level '{}': expected off, error, warn, info, debug or trace",
                self.logging.level
            );
        }

        if self.logging.max_entries == 0 || self.logging.max_entries > 10_000 {
            anyhow::bail!("max_entries must be between 1 and 10000, got {}", self.logging.max_entries);
        }

        if self.session.demo_dialogs > 200 {
            anyhow::bail!("demo_dialogs cannot exceed 200, got {}", self.session.demo_dialogs);
        }

        if let Some(file) = &self.session.dialogs_file {
            if file.as_os_str().is_empty() {
                anyhow::bail!("dialogs_file cannot be empty");
            }
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# chatlist configuration file\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::DEFAULT_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("chatlist"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
