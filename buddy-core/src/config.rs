//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/brainstorm-buddy/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/brainstorm-buddy/` (~/.config/brainstorm-buddy/)
//! - Data: `$XDG_DATA_HOME/brainstorm-buddy/` (~/.local/share/brainstorm-buddy/)
//! - State/Logs: `$XDG_STATE_HOME/brainstorm-buddy/` (~/.local/state/brainstorm-buddy/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "brainstorm-buddy";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Simulated assistant latency
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Storage location overrides
    #[serde(default)]
    pub storage: StorageConfig,

    /// Terminal UI preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Delays applied before generated text becomes visible
#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Delay before summary suggestions appear, in milliseconds
    #[serde(default = "default_suggestion_delay")]
    pub suggestion_delay_ms: u64,

    /// Delay before a chat reply appears, in milliseconds
    #[serde(default = "default_reply_delay")]
    pub reply_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            suggestion_delay_ms: default_suggestion_delay(),
            reply_delay_ms: default_reply_delay(),
        }
    }
}

fn default_suggestion_delay() -> u64 {
    1500
}

fn default_reply_delay() -> u64 {
    1500
}

/// Storage overrides
#[derive(Debug, Deserialize, Default, Clone)]
pub struct StorageConfig {
    /// Override path for the key-value store file
    pub path: Option<PathBuf>,
}

/// UI preferences
#[derive(Debug, Deserialize, Default, Clone)]
pub struct UiConfig {
    /// Dark theme when no dark-mode flag has been stored yet
    #[serde(default)]
    pub prefer_dark: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.logging.max_files == 0 {
            return Err(Error::Config(
                "logging.max_files must be at least 1".to_string(),
            ));
        }
        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                return Err(Error::Config("storage.path must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Store file to open: the configured override, else [`Config::default_store_path`]
    pub fn store_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(Self::default_store_path)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/brainstorm-buddy/config.toml`
    pub fn config_path() -> PathBuf {
        xdg_config_home().join(APP_DIR).join("config.toml")
    }

    /// Returns the data directory path (for the store and shared files)
    ///
    /// `$XDG_DATA_HOME/brainstorm-buddy/`
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join(APP_DIR)
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/brainstorm-buddy/`
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join(APP_DIR)
    }

    /// Returns the default store file path
    ///
    /// `$XDG_DATA_HOME/brainstorm-buddy/store.db`
    pub fn default_store_path() -> PathBuf {
        Self::data_dir().join("store.db")
    }

    /// Directory the file share target writes into
    pub fn share_dir() -> PathBuf {
        Self::data_dir().join("shared")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/brainstorm-buddy/brainstorm-buddy.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("brainstorm-buddy.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assistant.suggestion_delay_ms, 1500);
        assert_eq!(config.assistant.reply_delay_ms, 1500);
        assert!(config.storage.path.is_none());
        assert!(!config.ui.prefer_dark);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[assistant]
reply_delay_ms = 250

[storage]
path = "/tmp/buddy/store.db"

[ui]
prefer_dark = true

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.assistant.reply_delay_ms, 250);
        assert_eq!(config.assistant.suggestion_delay_ms, 1500);
        assert_eq!(config.store_path(), PathBuf::from("/tmp/buddy/store.db"));
        assert!(config.ui.prefer_dark);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_store_path_defaults_to_data_dir() {
        let config = Config::default();
        assert!(config.store_path().ends_with("brainstorm-buddy/store.db"));
    }

    #[test]
    fn test_validate_rejects_zero_log_files() {
        let config: Config = toml::from_str("[logging]\nmax_files = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[assistant]\nsuggestion_delay_ms = 10\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.assistant.suggestion_delay_ms, 10);
    }

    #[test]
    fn test_load_from_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[assistant\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
