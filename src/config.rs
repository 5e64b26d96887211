//! Monitor configuration.
//!
//! Cadence and threshold settings for the session monitor, with defaults
//! matching the shipped behavior (check every 30 seconds, warn inside the
//! final 5 minutes). Configuration is stored at
//! `~/.config/tokenwatch/config.json`; a missing file yields the defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for the config directory path
const APP_NAME: &str = "tokenwatch";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Seconds between status checks
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Width of the pre-expiry warning band, in minutes
const DEFAULT_WARNING_MINUTES: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub poll_interval_secs: u64,
    pub warning_minutes: i64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            warning_minutes: DEFAULT_WARNING_MINUTES,
        }
    }
}

impl MonitorConfig {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Ok(serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Interval between poll-timer ticks.
    ///
    /// A zero interval (from a hand-edited config file or caller) falls back
    /// to the default: `tokio::time::interval` panics on a zero period, and
    /// that panic would land inside the detached poll task and silently kill
    /// monitoring.
    pub fn poll_interval(&self) -> Duration {
        if self.poll_interval_secs == 0 {
            warn!(
                default_secs = DEFAULT_POLL_INTERVAL_SECS,
                "Zero poll interval configured, using default"
            );
            return Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS);
        }
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Remaining-time threshold below which the one-shot warning fires.
    pub fn warning_band(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.warning_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.warning_band(), chrono::Duration::minutes(5));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: MonitorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.warning_minutes, 5);
    }

    #[test]
    fn test_zero_poll_interval_falls_back_to_default() {
        let config = MonitorConfig {
            poll_interval_secs: 0,
            warning_minutes: 5,
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_round_trip() {
        let config = MonitorConfig {
            poll_interval_secs: 10,
            warning_minutes: 2,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.poll_interval_secs, 10);
        assert_eq!(back.warning_minutes, 2);
    }
}
