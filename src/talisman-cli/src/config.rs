//! Configuration management for the talisman CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "https://sky.coflnet.com/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the CoflNet API
    pub api_base: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Extra attempts for failed requests
    pub retries: u32,
    /// Bounds of the random pause after each request
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 15,
            retries: 2,
            min_delay_ms: 400,
            max_delay_ms: 800,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("talisman");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Apply a command-line API base override
    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        if let Some(base) = api_base {
            self.api_base = base;
        }
        self
    }

    /// Delay bounds in milliseconds, ordered
    pub fn delay_range(&self) -> (u64, u64) {
        if self.min_delay_ms <= self.max_delay_ms {
            (self.min_delay_ms, self.max_delay_ms)
        } else {
            (self.max_delay_ms, self.min_delay_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talisman").join("config.toml");
        let config = Config {
            retries: 5,
            ..Config::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base = \"http://localhost:8080\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_api_base_override() {
        let config = Config::default().with_api_base(Some("http://x".to_string()));
        assert_eq!(config.api_base, "http://x");
        let config = Config::default().with_api_base(None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_delay_range_is_ordered() {
        let config = Config {
            min_delay_ms: 900,
            max_delay_ms: 100,
            ..Config::default()
        };
        assert_eq!(config.delay_range(), (100, 900));
    }
}
