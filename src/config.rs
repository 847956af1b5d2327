//! Configuration loading and management.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Storage-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("zen-checklist").join("checklist.db"))
        .unwrap_or_else(|| PathBuf::from(".zen-checklist/checklist.db"))
}

impl Config {
    /// Load configuration from file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations or return defaults.
    pub fn load_or_default() -> Self {
        // Try .zen-checklist/config.yaml in the working directory
        if let Ok(config) = Self::load(".zen-checklist/config.yaml") {
            return config;
        }

        // Then the user config directory
        if let Some(config_dir) = dirs::config_dir() {
            if let Ok(config) = Self::load(config_dir.join("zen-checklist/config.yaml")) {
                return config;
            }
        }

        // Fall back to defaults with environment overrides
        let mut config = Self::default();

        if let Ok(db_path) = std::env::var("ZEN_CHECKLIST_DB_PATH") {
            config.storage.db_path = PathBuf::from(db_path);
        }

        config
    }

    /// Ensure the database directory exists.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.storage.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
