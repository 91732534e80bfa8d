//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory where run sessions are stored.
    pub sessions_dir: PathBuf,
    /// Directory where the file plugin stores backups of removed files.
    pub backup_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sessions_dir: dirs_config_path().join("sessions"),
            backup_dir: dirs_config_path().join("backups"),
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tweak_runner")
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
        }
    }

    Config::default()
}
