//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `streetlight.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use streetlight_adapter_virtual::PinLevel;
use streetlight_domain::id::{LIGHT_COUNT, LightId};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Sampling and override timing.
    pub control: ControlConfig,
    /// Simulated wiring.
    pub hardware: HardwareConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Control loop timing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Seconds between two sensor sampling passes.
    pub sample_interval_secs: u64,
    /// Seconds a manual command suspends automatic control.
    pub override_duration_secs: u64,
    /// Let the sensors switch the lights. When off, only manual commands do.
    pub auto_mode: bool,
}

/// Ambient light level the simulated sensors start at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbientLevel {
    #[default]
    Dark,
    Bright,
}

/// Simulated hardware wiring.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Lights whose sensor is wired to a broken input.
    pub faulted_sensors: Vec<u32>,
    /// Initial sensor level of every light.
    pub initial_level: AmbientLevel,
}

impl Config {
    /// Load configuration from `streetlight.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("streetlight.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
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

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("STREETLIGHT_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("STREETLIGHT_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("STREETLIGHT_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("STREETLIGHT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(secs) =
            var("STREETLIGHT_SAMPLE_INTERVAL_SECS").and_then(|val| val.parse().ok())
        {
            self.control.sample_interval_secs = secs;
        }
        if let Some(secs) = var("STREETLIGHT_OVERRIDE_SECS").and_then(|val| val.parse().ok()) {
            self.control.override_duration_secs = secs;
        }
        if let Some(auto_mode) = var("STREETLIGHT_AUTO_MODE").and_then(|val| val.parse().ok()) {
            self.control.auto_mode = auto_mode;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.control.sample_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "sample interval must be non-zero".to_string(),
            ));
        }
        if self.control.override_duration_secs == 0 {
            return Err(ConfigError::Validation(
                "override duration must be non-zero".to_string(),
            ));
        }
        if let Some(id) = self
            .hardware
            .faulted_sensors
            .iter()
            .find(|id| LightId::try_from(**id).is_err())
        {
            return Err(ConfigError::Validation(format!(
                "faulted sensor {id} is not a light (expected 1..={LIGHT_COUNT})"
            )));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Time between two sensor sampling passes.
    #[must_use]
    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.control.sample_interval_secs)
    }

    /// Time a manual command suspends automatic control.
    #[must_use]
    pub fn override_duration(&self) -> Duration {
        Duration::from_secs(self.control.override_duration_secs)
    }

    /// Lights wired to a broken sensor. Out-of-range ids are skipped.
    #[must_use]
    pub fn faulted_lights(&self) -> Vec<LightId> {
        self.hardware
            .faulted_sensors
            .iter()
            .filter_map(|id| LightId::try_from(*id).ok())
            .collect()
    }

    /// Initial level of the simulated sensors.
    #[must_use]
    pub fn initial_level(&self) -> PinLevel {
        match self.hardware.initial_level {
            AmbientLevel::Dark => PinLevel::Low,
            AmbientLevel::Bright => PinLevel::High,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "streetlightd=info,streetlight=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            sample_interval_secs: 2,
            override_duration_secs: 30,
            auto_mode: true,
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            faulted_sensors: vec![4],
            initial_level: AmbientLevel::Dark,
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
