//! Time and timestamp helpers.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// UTC timestamp used for override deadlines and event times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Timestamp `duration` after `from`, saturating far in the future.
#[must_use]
pub fn deadline(from: Timestamp, duration: Duration) -> Timestamp {
    TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| from.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Time left between `now` and `deadline`, zero once it has passed.
#[must_use]
pub fn remaining(now: Timestamp, deadline: Timestamp) -> Duration {
    (deadline - now).to_std().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_add_duration_to_deadline() {
        let start = now();
        let end = deadline(start, Duration::from_secs(30));
        assert_eq!((end - start).num_seconds(), 30);
    }

    #[test]
    fn should_saturate_deadline_on_overflow() {
        let end = deadline(now(), Duration::MAX);
        assert_eq!(end, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn should_report_remaining_time_before_deadline() {
        let start = now();
        let end = deadline(start, Duration::from_secs(5));
        assert_eq!(remaining(start, end), Duration::from_secs(5));
    }

    #[test]
    fn should_report_zero_remaining_after_deadline() {
        let start = now();
        let end = deadline(start, Duration::from_secs(5));
        let later = deadline(start, Duration::from_secs(6));
        assert_eq!(remaining(later, end), Duration::ZERO);
        assert_eq!(remaining(end, end), Duration::ZERO);
    }
}
