//! Common error types used across the workspace.
//!
//! Each failure mode is its own typed error; [`StreetlightError`] composes
//! them via `#[from]` for callers that need a single error type.

use crate::id::{LIGHT_COUNT, LightId};

/// Top-level error for operations on the light fleet.
#[derive(Debug, thiserror::Error)]
pub enum StreetlightError {
    #[error("unknown light")]
    UnknownLight(#[from] UnknownLightError),

    #[error("invalid command")]
    InvalidCommand(#[from] InvalidCommandError),
}

/// A light id outside the configured set was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("light {id} is not configured (expected 1..={LIGHT_COUNT})")]
pub struct UnknownLightError {
    pub id: u32,
}

impl From<LightId> for UnknownLightError {
    fn from(id: LightId) -> Self {
        Self {
            id: u32::from(id.get()),
        }
    }
}

/// A manual command was rejected before any state change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCommandError {
    #[error(transparent)]
    UnknownLight(#[from] UnknownLightError),

    #[error("invalid action `{0}`, must be \"on\" or \"off\"")]
    UnknownAction(String),
}
