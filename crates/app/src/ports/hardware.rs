//! Hardware port — the only way the core touches sensors and relays.
//!
//! Implementations are expected to be fast and non-blocking: the core calls
//! [`LightHardware::set_actuator`] while holding a light's record lock so the
//! relay write and the logical state change are atomic for that light.

use streetlight_domain::id::LightId;
use streetlight_domain::light::{ActuationState, SensorReading};

/// Sensor and relay access for the light fleet.
pub trait LightHardware: Send + Sync {
    /// Read a light's brightness sensor.
    ///
    /// Hardware errors must be reported as [`SensorReading::Faulted`],
    /// never raised to the caller.
    fn read_sensor(&self, id: LightId) -> SensorReading;

    /// Drive a light's relay.
    ///
    /// Best effort: the core logs failures and does not retry.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError`] when the relay could not be written.
    fn set_actuator(&self, id: LightId, state: ActuationState) -> Result<(), HardwareError>;
}

/// Failure reported by a hardware adapter.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// No relay is wired for this light.
    #[error("no relay wired for light {0}")]
    NotWired(LightId),

    /// The relay write itself failed.
    #[error("relay write failed for light {light}")]
    Write {
        light: LightId,
        #[source]
        source: std::io::Error,
    },
}
