//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Hold duration override (development only; the product holds 60s)
//! - Celebration toggle
//! - Share link
//!
//! Configuration is stored at `~/.config/dailyhold/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Hold-session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldConfig {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
}

/// Celebration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelebrationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Share/export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    #[serde(default = "default_share_url")]
    pub url: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dailyhold/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hold: HoldConfig,
    #[serde(default)]
    pub celebration: CelebrationConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

fn default_duration_secs() -> u32 {
    60
}
fn default_true() -> bool {
    true
}
fn default_share_url() -> String {
    "https://www.dailyhold.co".into()
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
        }
    }
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            url: default_share_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold: HoldConfig::default(),
            celebration: CelebrationConfig::default(),
            share: ShareConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/dailyhold"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load, falling back to default on any failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}
