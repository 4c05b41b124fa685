//! Manual override — a time-bounded suspension of automatic control.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Override status of a light.
///
/// While [`Active`](Self::Active), the auto-control policy must leave the
/// light's actuation untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum OverrideState {
    #[default]
    Inactive,
    Active { expires_at: Timestamp },
}

impl OverrideState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Deadline of the active override, if any.
    #[must_use]
    pub fn expires_at(&self) -> Option<Timestamp> {
        match self {
            Self::Active { expires_at } => Some(*expires_at),
            Self::Inactive => None,
        }
    }
}
