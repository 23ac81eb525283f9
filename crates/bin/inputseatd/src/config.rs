//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `inputseat.toml` in the working directory (or the file named by
//! `INPUTSEAT_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::str::FromStr;

use inputseat_adapter_evdev::CalibrationMatrix;
use inputseat_adapter_virtual::Behavior;
use inputseat_domain::seat::SeatName;
use serde::Deserialize;

const DEFAULT_PATH: &str = "inputseat.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Which driver materialises devices.
    pub driver: DriverConfig,
    /// Device nodes to add at startup, in order.
    pub devices: Vec<DeviceConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    /// Kernel evdev nodes.
    #[default]
    Evdev,
    /// In-memory devices, for demos.
    Virtual,
}

impl FromStr for DriverKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evdev" => Ok(Self::Evdev),
            "virtual" => Ok(Self::Virtual),
            other => Err(ConfigError::Validation(format!("unknown driver '{other}'"))),
        }
    }
}

/// Driver selection and options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub kind: DriverKind,
    /// Take exclusive access to evdev nodes.
    pub grab: bool,
}

/// One device node to manage.
#[derive(Debug, Deserialize)]
pub struct DeviceConfig {
    /// Device node path.
    pub path: String,
    /// Logical seat to move the device to after it is added.
    #[serde(default)]
    pub seat: Option<String>,
    /// Calibration matrix for absolute devices (evdev driver).
    #[serde(default)]
    pub calibration: Option<CalibrationMatrix>,
    /// Scripted outcome (virtual driver).
    #[serde(default)]
    pub behavior: Behavior,
}

impl Config {
    /// Load configuration from `inputseat.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("INPUTSEAT_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("INPUTSEAT_DRIVER") {
            self.driver.kind = val.parse()?;
        }
        if let Ok(val) = std::env::var("INPUTSEAT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for device in &self.devices {
            if device.path.is_empty() {
                return Err(ConfigError::Validation(
                    "device path must not be empty".to_string(),
                ));
            }
            if let Some(seat) = &device.seat {
                SeatName::default_for(Some(seat)).validate().map_err(|_| {
                    ConfigError::Validation(format!("empty seat name for '{}'", device.path))
                })?;
            }
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "inputseatd=info,inputseat_app=info,inputseat_adapter_evdev=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
