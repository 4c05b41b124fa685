//! Control service — the inbound port for manual commands and status reads.

use std::sync::Arc;
use std::time::Duration;

use streetlight_domain::command::Action;
use streetlight_domain::error::{InvalidCommandError, UnknownLightError};
use streetlight_domain::event::{ChangeSource, EventKind, LightEvent};
use streetlight_domain::id::LightId;
use streetlight_domain::light::{ActuationState, LightRecord};
use streetlight_domain::time::Timestamp;

use crate::override_manager::OverrideManager;
use crate::ports::{Clock, EventPublisher, LightHardware};
use crate::store::LightStore;

/// Application service for manual control of the lights.
pub struct ControlService<H, C, P> {
    store: Arc<LightStore>,
    hardware: Arc<H>,
    overrides: OverrideManager<C, P>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<H, C, P> ControlService<H, C, P>
where
    H: LightHardware + 'static,
    C: Clock + 'static,
    P: EventPublisher + 'static,
{
    /// Create a service whose overrides last `override_duration`.
    pub fn new(
        store: Arc<LightStore>,
        hardware: Arc<H>,
        clock: Arc<C>,
        publisher: Arc<P>,
        override_duration: Duration,
    ) -> Self {
        let overrides = OverrideManager::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            Arc::clone(&publisher),
            override_duration,
        );
        Self {
            store,
            hardware,
            overrides,
            publisher,
            clock,
        }
    }

    /// How long a manual command suspends automatic control.
    #[must_use]
    pub fn override_duration(&self) -> Duration {
        self.overrides.duration()
    }

    /// Current time according to the controller's clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Validate and apply a raw manual command.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCommandError::UnknownLight`] when `light_id` is not
    /// configured and [`InvalidCommandError::UnknownAction`] when `action`
    /// is neither `on` nor `off`. Nothing changes in either case.
    pub async fn submit(
        &self,
        light_id: u32,
        action: &str,
    ) -> Result<ActuationState, InvalidCommandError> {
        let id = LightId::try_from(light_id)?;
        let action: Action = action.parse()?;
        self.submit_action(id, action)
            .await
            .map_err(InvalidCommandError::from)
    }

    /// Force a light on or off and start (or renew) its manual override.
    ///
    /// The relay is written even when the light is already in the requested
    /// state. Faulted lights can be driven manually.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLightError`] if `id` is not configured.
    pub async fn submit_action(
        &self,
        id: LightId,
        action: Action,
    ) -> Result<ActuationState, UnknownLightError> {
        let target = action.target();
        let (from, expires_at) = self.store.update(id, |record| {
            let from = std::mem::replace(&mut record.actuation, target);
            let expires_at = self.overrides.activate(record);
            if let Err(err) = self.hardware.set_actuator(id, target) {
                tracing::warn!(light = %id, error = %err, "relay write failed, keeping intended state");
            }
            (from, expires_at)
        })?;
        self.overrides.schedule_expiry(id, expires_at);

        tracing::info!(
            light = %id,
            %action,
            %expires_at,
            "manual override activated"
        );

        let now = self.clock.now();
        self.publisher
            .publish(LightEvent::new(
                id,
                EventKind::OverrideActivated { expires_at },
                now,
            ))
            .await;
        if from != target {
            self.publisher
                .publish(LightEvent::new(
                    id,
                    EventKind::ActuationChanged {
                        from,
                        to: target,
                        source: ChangeSource::Manual,
                    },
                    now,
                ))
                .await;
        }

        Ok(target)
    }

    /// Snapshot of every light, ordered by id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(LightId, LightRecord)> {
        self.store.get_all()
    }

    /// Snapshot of one light.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLightError`] if `id` is not configured.
    pub fn light(&self, id: LightId) -> Result<LightRecord, UnknownLightError> {
        self.store.get(id)
    }

    /// Drive every relay off, used when the controller shuts down.
    pub async fn switch_all_off(&self) {
        let mut events = Vec::new();
        for id in self.store.ids() {
            let result = self.store.update(id, |record| {
                let from = std::mem::replace(&mut record.actuation, ActuationState::Off);
                if let Err(err) = self.hardware.set_actuator(id, ActuationState::Off) {
                    tracing::warn!(light = %id, error = %err, "relay write failed during shutdown");
                }
                from
            });
            if let Ok(ActuationState::On) = result {
                events.push(LightEvent::new(
                    id,
                    EventKind::ActuationChanged {
                        from: ActuationState::On,
                        to: ActuationState::Off,
                        source: ChangeSource::Shutdown,
                    },
                    self.clock.now(),
                ));
            }
        }
        tracing::info!(lights = self.store.len(), "all lights switched off");
        for event in events {
            self.publisher.publish(event).await;
        }
    }
}
