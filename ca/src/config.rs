//! Engine configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scheduling policy
    pub scheduling: SchedulingConfig,

    /// Listing limits
    pub listing: ListingConfig,

    /// Service channel sizing
    pub service: ServiceConfig,

    /// Event bus sizing
    pub events: EventsConfig,
}

impl EngineConfig {
    /// Validate configuration before use
    ///
    /// Checks channel and page sizes that would otherwise panic or wedge the
    /// engine at runtime. Call this early in startup to fail fast with clear
    /// error messages.
    pub fn validate(&self) -> Result<()> {
        if self.service.channel_buffer == 0 {
            return Err(eyre::eyre!("service.channel-buffer must be at least 1"));
        }
        if self.events.channel_capacity == 0 {
            return Err(eyre::eyre!("events.channel-capacity must be at least 1"));
        }
        if self.listing.max_page == 0 {
            return Err(eyre::eyre!("listing.max-page must be at least 1"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .corpact.yml
        let local_config = PathBuf::from(".corpact.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/corpact/corpact.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("corpact").join("corpact.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Scheduling policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Reject tasks whose due time is already in the past at schedule time
    #[serde(rename = "reject-backdated")]
    pub reject_backdated: bool,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            reject_backdated: false,
        }
    }
}

/// Listing limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Maximum entries a single list call may return
    #[serde(rename = "max-page")]
    pub max_page: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { max_page: 100 }
    }
}

/// Service channel sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Command channel capacity
    #[serde(rename = "channel-buffer")]
    pub channel_buffer: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { channel_buffer: 256 }
    }
}

/// Event bus sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity
    #[serde(rename = "channel-capacity")]
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: crate::events::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
