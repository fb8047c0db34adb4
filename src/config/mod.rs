// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Configuration module

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Application version
    pub version: String,

    /// Data directory
    pub data_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Engine configuration
    pub engine: EngineConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Nightlatch".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            engine: EngineConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("nightlatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum classifier confidence treated as a cat sighting (0..=1)
    pub cat_confidence_threshold: f32,

    /// Use the built-in demo classifier instead of a wired-up camera service
    pub demo_mode: bool,

    /// Fixed RNG seed for the demo classifier; unset seeds from entropy
    pub demo_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: 0.5,
            demo_mode: true,
            demo_seed: None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Enable durable storage; disabled keeps everything in memory
    pub enabled: bool,

    /// Database path
    pub path: PathBuf,

    /// Default number of events shown by the history view
    pub history_limit: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("./data/nightlatch.db"),
            history_limit: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.engine.cat_confidence_threshold = 0.8;
        config.engine.demo_seed = Some(42);
        config.database.enabled = false;

        let toml = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml).unwrap();

        assert_eq!(loaded.app_name, config.app_name);
        assert_eq!(loaded.engine.cat_confidence_threshold, 0.8);
        assert_eq!(loaded.engine.demo_seed, Some(42));
        assert!(!loaded.database.enabled);
        assert_eq!(loaded.database.path, config.database.path);
    }

    #[test]
    fn test_defaults_are_demo_friendly() {
        let config = Config::default();
        assert!(config.engine.demo_mode);
        assert!(config.engine.demo_seed.is_none());
        assert_eq!(config.engine.cat_confidence_threshold, 0.5);
        assert!(config.database.enabled);
    }
}
