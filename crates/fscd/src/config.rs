//! Configuration management for fscd.
//!
//! Loads settings from /etc/fscd/config.toml or uses defaults. Every value
//! has a built-in default matching the shipping firmware, so a device with
//! no config file behaves exactly like the stock sanity checker.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/fscd/config.toml";

/// Fallback config file path (writable partition on most targets)
pub const FALLBACK_CONFIG_PATH: &str = "/nvram/fscd/config.toml";

/// Poll loop timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Total image validation expiry in seconds, reported to the HAL
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sleep between response polls in seconds
    #[serde(default = "default_sample_interval")]
    pub sample_interval_secs: u64,

    /// Margin subtracted from the timeout so the verdict lands before an
    /// independent hardware watchdog can force a rollback
    #[serde(default = "default_safety_offset")]
    pub safety_offset_secs: u64,
}

fn default_timeout() -> u64 {
    3600 // 60 minutes, mirrored by the vendor watchdog
}

fn default_sample_interval() -> u64 {
    30
}

fn default_safety_offset() -> u64 {
    300 // 5 minute startup/reset margin
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            sample_interval_secs: default_sample_interval(),
            safety_offset_secs: default_safety_offset(),
        }
    }
}

impl MonitorConfig {
    /// Deadline for the poll loop: timeout minus the safety margin
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.saturating_sub(self.safety_offset_secs))
    }

    /// Sleep between poll ticks
    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }
}

/// Filesystem artifacts probed at runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Presence of this file forces the sanity check on any image
    #[serde(default = "default_debug_override_path")]
    pub debug_override: String,

    /// Candidate version descriptors, tried in order
    #[serde(default = "default_version_descriptors")]
    pub version_descriptors: Vec<String>,

    /// Update-service response artifact
    #[serde(default = "default_response_path")]
    pub response: String,
}

fn default_debug_override_path() -> String {
    "/nvram/forceFSC".to_string()
}

fn default_version_descriptors() -> Vec<String> {
    vec!["/fss/gw/version.txt".to_string(), "/version.txt".to_string()]
}

fn default_response_path() -> String {
    "/tmp/response.txt".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            debug_override: default_debug_override_path(),
            version_descriptors: default_version_descriptors(),
            response: default_response_path(),
        }
    }
}

/// Conservative-fallback policy knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Classification when no version descriptor can be found.
    /// true (fail-closed) forces the wait/check path on unidentifiable
    /// images; left configurable because the right answer is still an
    /// open question for some targets.
    #[serde(default = "default_missing_descriptor_is_production")]
    pub missing_descriptor_is_production: bool,
}

fn default_missing_descriptor_is_production() -> bool {
    true
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            missing_descriptor_is_production: default_missing_descriptor_is_production(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Config {
    /// Load config from the standard locations, or return defaults
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_PATH)
            .or_else(|_| Self::load_from_path(FALLBACK_CONFIG_PATH))
            .unwrap_or_else(|e| {
                warn!("Config not found, using defaults: {}", e);
                Config::default()
            })
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }
}
