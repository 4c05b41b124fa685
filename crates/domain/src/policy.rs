//! Auto-control policy.
//!
//! A direct state-matching function: dark turns a light on, bright turns it
//! off. There is no hysteresis; the binary sensor is debounced in hardware.

use crate::light::{ActuationState, SensorReading};

/// Decide the target actuation for a light given its reading.
///
/// Returns `None` when nothing must change, including when the actuation
/// already matches the reading, so callers never issue a redundant relay
/// write. Faulted readings never produce a decision.
#[must_use]
pub fn decide(reading: SensorReading, current: ActuationState) -> Option<ActuationState> {
    match (reading, current) {
        (SensorReading::Dark, ActuationState::Off) => Some(ActuationState::On),
        (SensorReading::Bright, ActuationState::On) => Some(ActuationState::Off),
        (SensorReading::Dark, ActuationState::On)
        | (SensorReading::Bright, ActuationState::Off)
        | (SensorReading::Faulted, _) => None,
    }
}
