//! Simulated GPIO lines for one light.

use streetlight_domain::light::{ActuationState, SensorReading};

/// Logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinLevel {
    #[default]
    Low,
    High,
}

impl PinLevel {
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<ActuationState> for PinLevel {
    /// Relays are active-high.
    fn from(state: ActuationState) -> Self {
        match state {
            ActuationState::On => Self::High,
            ActuationState::Off => Self::Low,
        }
    }
}

/// Sensor input and relay output wired to one light.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LightPins {
    pub sensor: PinLevel,
    pub sensor_broken: bool,
    pub relay: PinLevel,
    pub relay_writes: u64,
    pub fail_writes: bool,
}

impl LightPins {
    pub fn new(sensor: PinLevel, sensor_broken: bool) -> Self {
        Self {
            sensor,
            sensor_broken,
            ..Self::default()
        }
    }

    /// Sample the sensor input; a broken sensor always reads faulted.
    pub fn read(&self) -> SensorReading {
        if self.sensor_broken {
            SensorReading::Faulted
        } else {
            SensorReading::from_pin_level(self.sensor.is_high())
        }
    }

    pub fn relay_state(&self) -> ActuationState {
        if self.relay.is_high() {
            ActuationState::On
        } else {
            ActuationState::Off
        }
    }
}
