//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up talisman defaults.

use crate::config::Config;
use anyhow::Result;

/// Requested configuration changes
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.api_base.is_none() && self.timeout_secs.is_none() && self.retries.is_none()
    }

    fn apply(self, config: &mut Config) {
        if let Some(base) = self.api_base {
            config.api_base = base;
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
    }
}

/// Handle the configure command
///
/// # Arguments
/// * `update` - Settings to change
/// * `show` - If true, show current configuration
pub fn handle(update: ConfigUpdate, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if update.is_empty() {
        show_usage();
        return Ok(());
    }

    update.apply(&mut config);
    config.save()?;

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("API base: {}", config.api_base);
    println!("Timeout: {}s", config.timeout_secs);
    println!("Retries: {}", config.retries);
    println!("Delay: {}-{}ms", config.min_delay_ms, config.max_delay_ms);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: talisman configure --set-api-base URL [--timeout SECS] [--retries N]");
    println!("   or: talisman configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_update() {
        let mut config = Config::default();
        ConfigUpdate {
            api_base: Some("http://localhost:3000".to_string()),
            timeout_secs: None,
            retries: Some(0),
        }
        .apply(&mut config);

        assert_eq!(config.api_base, "http://localhost:3000");
        assert_eq!(config.timeout_secs, Config::default().timeout_secs);
        assert_eq!(config.retries, 0);
    }

    #[test]
    fn test_empty_update() {
        assert!(ConfigUpdate::default().is_empty());
        assert!(!ConfigUpdate {
            retries: Some(1),
            ..ConfigUpdate::default()
        }
        .is_empty());
    }

    #[test]
    fn test_config_path_exists() {
        let result = Config::config_path();
        assert!(result.is_ok());
    }
}
