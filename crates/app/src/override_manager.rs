//! Override lifecycle — activation and timed expiry of manual overrides.
//!
//! An override is a deadline stamped on the light's record. Expiry is a
//! deferred task that clears the override only if the record still carries
//! the deadline the task was scheduled for: a newer command that renewed the
//! deadline makes older tasks stale, so no timer handle is ever cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use streetlight_domain::error::UnknownLightError;
use streetlight_domain::event::{EventKind, LightEvent};
use streetlight_domain::id::LightId;
use streetlight_domain::light::{LightRecord, OverrideState};
use streetlight_domain::time::{Timestamp, deadline, remaining};

use crate::ports::{Clock, EventPublisher};
use crate::store::LightStore;

/// Default time a manual command suspends automatic control.
pub const DEFAULT_OVERRIDE_DURATION: Duration = Duration::from_secs(30);

/// Outcome of an expiry attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// The override was cleared; automatic control resumes.
    Cleared,
    /// The record no longer carries this deadline (renewed or already cleared).
    Superseded,
    /// The deadline has not been reached yet.
    NotDue,
}

/// Activates overrides and runs their expiry.
pub struct OverrideManager<C, P> {
    store: Arc<LightStore>,
    clock: Arc<C>,
    publisher: Arc<P>,
    duration: Duration,
}

impl<C, P> Clone for OverrideManager<C, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            publisher: Arc::clone(&self.publisher),
            duration: self.duration,
        }
    }
}

impl<C, P> OverrideManager<C, P>
where
    C: Clock + 'static,
    P: EventPublisher + 'static,
{
    /// Create a manager whose overrides last `duration`.
    pub fn new(
        store: Arc<LightStore>,
        clock: Arc<C>,
        publisher: Arc<P>,
        duration: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            publisher,
            duration,
        }
    }

    /// How long each override lasts.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current time according to the manager's clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Stamp a fresh override on `record` and return its deadline.
    ///
    /// Meant to be called inside [`LightStore::update`] so the override and
    /// whatever else the caller changes land atomically. Any previous
    /// deadline is replaced, which makes its pending expiry stale.
    pub fn activate(&self, record: &mut LightRecord) -> Timestamp {
        let expires_at = deadline(self.clock.now(), self.duration);
        record.override_state = OverrideState::Active { expires_at };
        expires_at
    }

    /// Clear the override of `id` if it still expires at `scheduled` and
    /// that moment has been reached.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLightError`] if `id` is not configured.
    pub fn expire_if_due(
        &self,
        id: LightId,
        scheduled: Timestamp,
    ) -> Result<Expiry, UnknownLightError> {
        let now = self.clock.now();
        self.store.update(id, |record| match record.override_state {
            OverrideState::Active { expires_at } if expires_at == scheduled => {
                if now < expires_at {
                    Expiry::NotDue
                } else {
                    record.override_state = OverrideState::Inactive;
                    Expiry::Cleared
                }
            }
            OverrideState::Active { .. } | OverrideState::Inactive => Expiry::Superseded,
        })
    }

    /// Spawn the deferred expiry for an override ending at `expires_at`.
    ///
    /// The task sleeps until the clock reaches the deadline (sleeping again
    /// if woken early) and then applies [`expire_if_due`](Self::expire_if_due).
    pub fn schedule_expiry(&self, id: LightId, expires_at: Timestamp) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move { manager.run_expiry(id, expires_at).await })
    }

    async fn run_expiry(self, id: LightId, expires_at: Timestamp) {
        loop {
            let wait = remaining(self.clock.now(), expires_at);
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }

            match self.expire_if_due(id, expires_at) {
                Ok(Expiry::NotDue) => {}
                Ok(Expiry::Cleared) => {
                    tracing::info!(light = %id, "manual override expired, back to automatic control");
                    let event = LightEvent::new(id, EventKind::OverrideExpired, self.clock.now());
                    self.publisher.publish(event).await;
                    return;
                }
                Ok(Expiry::Superseded) => {
                    tracing::debug!(light = %id, %expires_at, "stale override expiry ignored");
                    return;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "override expiry for unknown light");
                    return;
                }
            }
        }
    }
}
