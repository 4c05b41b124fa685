//! Sensor reading — what a light's brightness sensor reports.

use serde::{Deserialize, Serialize};

/// Discrete reading of a binary brightness sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorReading {
    #[default]
    Dark,
    Bright,
    /// The sensor is unreliable; the light is excluded from automatic control.
    Faulted,
}

impl SensorReading {
    /// Map a digital sensor pin level to a reading.
    ///
    /// A HIGH level means the sensor sees light; LOW means dark.
    #[must_use]
    pub fn from_pin_level(high: bool) -> Self {
        if high { Self::Bright } else { Self::Dark }
    }

    /// Whether the reading can drive automatic control.
    #[must_use]
    pub fn is_faulted(self) -> bool {
        matches!(self, Self::Faulted)
    }
}

impl std::fmt::Display for SensorReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Bright => f.write_str("bright"),
            Self::Faulted => f.write_str("faulted"),
        }
    }
}
