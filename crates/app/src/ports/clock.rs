//! Clock port — where override deadlines get their timestamps.

use streetlight_domain::time::{Timestamp, deadline, now};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock anchored once, then advanced by tokio's monotonic clock.
///
/// Timestamps never go backwards when the system clock is adjusted, and
/// follow tokio's paused clock in tests, so deadlines line up exactly with
/// `tokio::time::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor_wall: Timestamp,
    anchor: tokio::time::Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            anchor_wall: now(),
            anchor: tokio::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        deadline(self.anchor_wall, self.anchor.elapsed())
    }
}
