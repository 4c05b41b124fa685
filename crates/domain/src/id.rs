//! Light identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLightError;

/// Number of lights wired to the controller.
pub const LIGHT_COUNT: u8 = 4;

/// Identifier of a light, numbered from `1` to [`LIGHT_COUNT`].
///
/// A `LightId` is only a number: stores reject ids outside their configured
/// set with [`UnknownLightError`]. Use [`TryFrom<u32>`] to validate raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(u8);

impl LightId {
    /// Wrap a raw light number without range validation.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// The raw light number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position of this light, or `None` when out of range.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        (1..=LIGHT_COUNT)
            .contains(&self.0)
            .then(|| usize::from(self.0 - 1))
    }

    /// All configured lights, in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=LIGHT_COUNT).map(Self)
    }
}

impl TryFrom<u32> for LightId {
    type Error = UnknownLightError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .map(Self)
            .filter(|id| id.index().is_some())
            .ok_or(UnknownLightError { id: value })
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
