//! Event — an immutable record of something that happened to a light.
//!
//! Events are produced when a reading changes, a relay is switched, or a
//! manual override starts or ends.

use serde::{Deserialize, Serialize};

use crate::id::LightId;
use crate::light::{ActuationState, SensorReading};
use crate::time::Timestamp;

/// Who caused an actuation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    /// The auto-control policy reacting to a sensor reading.
    Auto,
    /// A manual command from the control interface.
    Manual,
    /// Controller shutdown.
    Shutdown,
}

impl std::fmt::Display for ChangeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Manual => f.write_str("manual"),
            Self::Shutdown => f.write_str("shutdown"),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    ReadingChanged {
        from: SensorReading,
        to: SensorReading,
    },
    ActuationChanged {
        from: ActuationState,
        to: ActuationState,
        source: ChangeSource,
    },
    OverrideActivated {
        expires_at: Timestamp,
    },
    OverrideExpired,
}

/// A state change on one light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightEvent {
    pub light_id: LightId,
    #[serde(flatten)]
    pub kind: EventKind,
    pub timestamp: Timestamp,
}

impl LightEvent {
    #[must_use]
    pub fn new(light_id: LightId, kind: EventKind, timestamp: Timestamp) -> Self {
        Self {
            light_id,
            kind,
            timestamp,
        }
    }
}
