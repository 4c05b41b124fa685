//! # streetlight-adapter-virtual
//!
//! Virtual hardware that stands in for the controller's GPIO wiring.
//!
//! ## Simulated wiring
//!
//! | Line | Direction | Levels |
//! |------|-----------|--------|
//! | Brightness sensor (LDR) | input | `HIGH` = bright, `LOW` = dark |
//! | Relay | output | `HIGH` = energized (active-high) |
//!
//! Sensors can be marked broken, in which case they always read
//! [`SensorReading::Faulted`]. Relay writes can be made to fail to exercise
//! the core's error path.
//!
//! ## Dependency rule
//!
//! Depends on `streetlight-app` (port traits) and `streetlight-domain` only.

mod pin;

use std::sync::{Mutex, MutexGuard, PoisonError};

use streetlight_app::ports::{HardwareError, LightHardware};
use streetlight_domain::id::LightId;
use streetlight_domain::light::{ActuationState, SensorReading};

pub use pin::PinLevel;

use pin::LightPins;

/// In-memory pin bank for the whole light fleet.
pub struct VirtualHardware {
    pins: Vec<Mutex<LightPins>>,
}

impl Default for VirtualHardware {
    fn default() -> Self {
        Self::new(PinLevel::Low, &[])
    }
}

impl VirtualHardware {
    /// Create a pin bank with every sensor at `ambient` and every relay off.
    /// Sensors of lights listed in `broken_sensors` always read faulted.
    #[must_use]
    pub fn new(ambient: PinLevel, broken_sensors: &[LightId]) -> Self {
        let pins = LightId::all()
            .map(|id| Mutex::new(LightPins::new(ambient, broken_sensors.contains(&id))))
            .collect();
        Self { pins }
    }

    /// Set the sensor level of one light.
    pub fn set_sensor(&self, id: LightId, level: PinLevel) {
        if let Some(mut pins) = self.lock(id) {
            pins.sensor = level;
        }
    }

    /// Set the sensor level of every light, as dusk or dawn would.
    pub fn set_ambient(&self, level: PinLevel) {
        for pins in &self.pins {
            lock(pins).sensor = level;
        }
    }

    /// Break (or repair) a light's sensor.
    pub fn set_sensor_broken(&self, id: LightId, broken: bool) {
        if let Some(mut pins) = self.lock(id) {
            pins.sensor_broken = broken;
        }
    }

    /// Make relay writes for one light fail (or succeed again).
    pub fn fail_relay_writes(&self, id: LightId, fail: bool) {
        if let Some(mut pins) = self.lock(id) {
            pins.fail_writes = fail;
        }
    }

    /// Current relay output of a light, `None` when not wired.
    #[must_use]
    pub fn relay(&self, id: LightId) -> Option<ActuationState> {
        self.lock(id).map(|pins| pins.relay_state())
    }

    /// Number of successful relay writes for a light.
    #[must_use]
    pub fn relay_writes(&self, id: LightId) -> u64 {
        self.lock(id).map_or(0, |pins| pins.relay_writes)
    }

    fn lock(&self, id: LightId) -> Option<MutexGuard<'_, LightPins>> {
        id.index()
            .and_then(|index| self.pins.get(index))
            .map(lock)
    }
}

fn lock(pins: &Mutex<LightPins>) -> MutexGuard<'_, LightPins> {
    pins.lock().unwrap_or_else(PoisonError::into_inner)
}

impl LightHardware for VirtualHardware {
    fn read_sensor(&self, id: LightId) -> SensorReading {
        self.lock(id)
            .map_or(SensorReading::Faulted, |pins| pins.read())
    }

    fn set_actuator(&self, id: LightId, state: ActuationState) -> Result<(), HardwareError> {
        let mut pins = self.lock(id).ok_or(HardwareError::NotWired(id))?;
        if pins.fail_writes {
            return Err(HardwareError::Write {
                light: id,
                source: std::io::Error::other("simulated relay failure"),
            });
        }
        pins.relay = PinLevel::from(state);
        pins.relay_writes += 1;
        tracing::trace!(light = %id, %state, "relay written");
        Ok(())
    }
}
