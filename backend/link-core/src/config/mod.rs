use crate::error::config::ConfigError;
use crate::{DEFAULT_COMMAND_PORT, DEFAULT_EVENT_PORT, LINK_HOSTNAME};

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "link.json";
const CONFIG_VERSION: u32 = 1;

/// Link endpoint configuration.
///
/// The host address and the two port numbers are the only externally
/// configurable values; they are read once at startup and treated as
/// process-wide constants afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Loopback address shared by both directions.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the receiver listens on for inbound commands.
    #[serde(default = "default_command_port")]
    pub command_port: u16,

    /// Port the sender connects to for outbound events.
    #[serde(default = "default_event_port")]
    pub event_port: u16,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            host: default_host(),
            command_port: default_command_port(),
            event_port: default_event_port(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_host() -> String {
    LINK_HOSTNAME.to_string()
}
fn default_command_port() -> u16 {
    DEFAULT_COMMAND_PORT
}
fn default_event_port() -> u16 {
    DEFAULT_EVENT_PORT
}

impl LinkConfig {
    /// Load config from `{config_dir}/link.json`.
    ///
    /// A missing file falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read,
    /// parsed, or validated.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: LinkConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to `{config_dir}/link.json` using atomic write
    /// (temp file + rename, so a crash never leaves a torn file).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on validation, serialization, or I/O failure.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Host must not be empty".to_string(),
            });
        }

        if self.command_port == 0 || self.event_port == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Ports must be non-zero".to_string(),
            });
        }

        if self.command_port == self.event_port {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Command and event ports must differ (both {})",
                    self.command_port
                ),
            });
        }

        Ok(())
    }

    /// `host:command_port`, the receiver's bind address.
    pub fn command_address(&self) -> String {
        format!("{}:{}", self.host, self.command_port)
    }

    /// `host:event_port`, the sender's connect address.
    pub fn event_address(&self) -> String {
        format!("{}:{}", self.host, self.event_port)
    }
}
