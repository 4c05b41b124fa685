//! Light — the per-light state record.
//!
//! A [`LightRecord`] holds everything the controller knows about one light:
//! the relay state it intends, the last sensor reading, and whether a manual
//! override currently suspends automatic control.

mod actuation;
mod override_state;
mod reading;

pub use actuation::ActuationState;
pub use override_state::OverrideState;
pub use reading::SensorReading;

use serde::{Deserialize, Serialize};

/// State of one light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightRecord {
    pub actuation: ActuationState,
    pub reading: SensorReading,
    #[serde(rename = "override")]
    pub override_state: OverrideState,
}

impl LightRecord {
    /// Initial record for a light whose sensor works.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial record for a light permanently wired to a broken sensor.
    #[must_use]
    pub fn faulted() -> Self {
        Self {
            reading: SensorReading::Faulted,
            ..Self::default()
        }
    }

    /// Whether the auto-control policy may act on this light right now.
    ///
    /// Faulted lights are never auto-controlled, whatever the override state.
    #[must_use]
    pub fn is_auto_controlled(&self) -> bool {
        !self.reading.is_faulted() && !self.override_state.is_active()
    }
}
