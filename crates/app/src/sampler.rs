//! Sensor sampler — the periodic pass that feeds the auto-control policy.
//!
//! One tick reads every sensor, stores the readings, then lets the policy
//! switch every light that is neither overridden nor faulted. The policy
//! check and the relay write happen inside a single [`LightStore::update`],
//! so a manual command racing with a tick either lands first (and the light
//! is skipped) or lands after (and wins).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use streetlight_domain::event::{ChangeSource, EventKind, LightEvent};
use streetlight_domain::id::LightId;
use streetlight_domain::light::{ActuationState, LightRecord};
use streetlight_domain::policy;

use crate::ports::{Clock, EventPublisher, LightHardware};
use crate::store::LightStore;

/// Default time between two sampling ticks.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(2);

/// A relay switched by the policy during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switched {
    pub light_id: LightId,
    pub from: ActuationState,
    pub to: ActuationState,
}

/// Periodic sensor sampling and automatic control.
pub struct SensorSampler<H, C, P> {
    store: Arc<LightStore>,
    hardware: Arc<H>,
    clock: Arc<C>,
    publisher: Arc<P>,
    interval: Duration,
    auto_mode: bool,
}

impl<H, C, P> SensorSampler<H, C, P>
where
    H: LightHardware + 'static,
    C: Clock + 'static,
    P: EventPublisher + 'static,
{
    pub fn new(
        store: Arc<LightStore>,
        hardware: Arc<H>,
        clock: Arc<C>,
        publisher: Arc<P>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            hardware,
            clock,
            publisher,
            interval,
            auto_mode: true,
        }
    }

    /// Enable or disable automatic control.
    ///
    /// With auto mode off, ticks keep recording readings but never switch a relay.
    #[must_use]
    pub fn with_auto_mode(mut self, auto_mode: bool) -> Self {
        self.auto_mode = auto_mode;
        self
    }

    /// Run one sampling pass and return the relays the policy switched.
    pub async fn tick(&self) -> Vec<Switched> {
        let mut events = Vec::new();

        for id in self.store.ids() {
            // Read outside the record lock: a slow sensor must not stall commands.
            let reading = self.hardware.read_sensor(id);
            match self.store.record_reading(id, reading) {
                Ok((from, to)) if from != to => {
                    events.push(self.event(id, EventKind::ReadingChanged { from, to }));
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(error = %err, "skipping reading for unknown light"),
            }
        }

        let mut switched = Vec::new();
        for id in self.store.ids().filter(|_| self.auto_mode) {
            match self.store.update(id, |record| self.apply_policy(id, record)) {
                Ok(Some(change)) => {
                    tracing::info!(
                        light = %id,
                        from = %change.from,
                        to = %change.to,
                        "light switched by sensor"
                    );
                    events.push(self.event(
                        id,
                        EventKind::ActuationChanged {
                            from: change.from,
                            to: change.to,
                            source: ChangeSource::Auto,
                        },
                    ));
                    switched.push(change);
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(error = %err, "skipping policy for unknown light"),
            }
        }

        for (id, record) in self.store.get_all() {
            let mode = if record.override_state.is_active() {
                "manual"
            } else {
                "auto"
            };
            tracing::debug!(
                light = %id,
                status = %record.actuation,
                reading = %record.reading,
                mode,
                "light status"
            );
        }

        for event in events {
            self.publisher.publish(event).await;
        }

        switched
    }

    /// Decide and actuate one light; runs with the record locked.
    fn apply_policy(&self, id: LightId, record: &mut LightRecord) -> Option<Switched> {
        if !record.is_auto_controlled() {
            return None;
        }
        let target = policy::decide(record.reading, record.actuation)?;
        let from = std::mem::replace(&mut record.actuation, target);
        if let Err(err) = self.hardware.set_actuator(id, target) {
            tracing::warn!(light = %id, error = %err, "relay write failed, keeping intended state");
        }
        Some(Switched {
            light_id: id,
            from,
            to: target,
        })
    }

    fn event(&self, id: LightId, kind: EventKind) -> LightEvent {
        LightEvent::new(id, kind, self.clock.now())
    }

    /// Start ticking every interval on a background task.
    ///
    /// The first tick runs immediately. Stopping is cooperative: the stop
    /// signal is checked before each tick and never interrupts one.
    #[must_use]
    pub fn spawn(self) -> SamplerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(stop_rx));
        SamplerHandle { stop_tx, task }
    }

    async fn run(self, mut stop: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX),
            auto_mode = self.auto_mode,
            "sensor sampler started"
        );

        loop {
            tokio::select! {
                biased;
                _ = stop.changed() => break,
                _ = ticker.tick() => {
                    if *stop.borrow() {
                        break;
                    }
                    self.tick().await;
                }
            }
        }

        tracing::info!("sensor sampler stopped");
    }
}

/// Handle on a running sampler task.
pub struct SamplerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    /// Signal the sampler to stop and wait for the current tick to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "sensor sampler task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::override_manager::{DEFAULT_OVERRIDE_DURATION, OverrideManager};
    use crate::ports::MonotonicClock;
    use crate::test_support::{FakeHardware, RecordingPublisher};
    use streetlight_domain::light::ActuationState::{Off, On};
    use streetlight_domain::light::SensorReading::{Bright, Dark, Faulted};
    use streetlight_domain::light::{OverrideState, SensorReading};

    struct Fixture {
        store: Arc<LightStore>,
        hardware: Arc<FakeHardware>,
        publisher: Arc<RecordingPublisher>,
        sampler: SensorSampler<FakeHardware, MonotonicClock, RecordingPublisher>,
    }

    fn fixture(readings: [SensorReading; 4], faulted: &[LightId]) -> Fixture {
        let store = Arc::new(LightStore::new(faulted));
        let hardware = Arc::new(FakeHardware::with_readings(readings));
        let publisher = Arc::new(RecordingPublisher::default());
        let sampler = SensorSampler::new(
            Arc::clone(&store),
            Arc::clone(&hardware),
            Arc::new(MonotonicClock::new()),
            Arc::clone(&publisher),
            DEFAULT_SAMPLE_INTERVAL,
        );
        Fixture {
            store,
            hardware,
            publisher,
            sampler,
        }
    }

    fn set_actuation(store: &LightStore, states: [ActuationState; 4]) {
        for (id, state) in LightId::all().zip(states) {
            store.update(id, |record| record.actuation = state).unwrap();
        }
    }

    fn actuations(store: &LightStore) -> Vec<ActuationState> {
        store
            .get_all()
            .into_iter()
            .map(|(_, record)| record.actuation)
            .collect()
    }

    #[tokio::test]
    async fn should_apply_policy_to_the_four_light_scenario() {
        let fx = fixture([Dark, Bright, Dark, Faulted], &[LightId::new(4)]);
        set_actuation(&fx.store, [Off, On, On, Off]);

        let switched = fx.sampler.tick().await;

        assert_eq!(actuations(&fx.store), vec![On, Off, On, Off]);
        assert_eq!(switched.len(), 2);
        assert_eq!(fx.hardware.writes_for(LightId::new(3)), 0);
        assert_eq!(fx.hardware.writes_for(LightId::new(4)), 0);
        assert_eq!(
            fx.hardware.writes(),
            vec![(LightId::new(1), On), (LightId::new(2), Off)]
        );
    }

    #[tokio::test]
    async fn should_store_readings_for_every_light() {
        let fx = fixture([Bright, Dark, Bright, Dark], &[LightId::new(4)]);

        fx.sampler.tick().await;

        let readings: Vec<SensorReading> = fx
            .store
            .get_all()
            .into_iter()
            .map(|(_, record)| record.reading)
            .collect();
        assert_eq!(readings, vec![Bright, Dark, Bright, Faulted]);
    }

    #[tokio::test]
    async fn should_never_auto_control_faulted_light() {
        let fx = fixture([Dark, Dark, Dark, Dark], &[LightId::new(4)]);
        let faulted = LightId::new(4);

        for _ in 0..3 {
            fx.sampler.tick().await;
        }

        assert_eq!(fx.store.get(faulted).unwrap().actuation, Off);
        assert_eq!(fx.hardware.writes_for(faulted), 0);
    }

    #[tokio::test]
    async fn should_exclude_light_when_hardware_reports_fault() {
        let fx = fixture([Faulted, Dark, Dark, Dark], &[]);

        fx.sampler.tick().await;

        assert_eq!(fx.store.get(LightId::new(1)).unwrap().actuation, Off);
        assert_eq!(fx.hardware.writes_for(LightId::new(1)), 0);
    }

    #[tokio::test]
    async fn should_not_touch_overridden_light() {
        let fx = fixture([Bright, Dark, Dark, Dark], &[]);
        let id = LightId::new(1);
        fx.store
            .update(id, |record| {
                record.actuation = On;
                record.override_state = OverrideState::Active {
                    expires_at: streetlight_domain::time::now(),
                };
            })
            .unwrap();

        fx.sampler.tick().await;

        assert_eq!(fx.store.get(id).unwrap().actuation, On);
        assert_eq!(fx.hardware.writes_for(id), 0);
    }

    #[tokio::test]
    async fn should_not_rewrite_relay_when_state_already_matches() {
        let fx = fixture([Dark, Dark, Dark, Dark], &[]);
        let id = LightId::new(2);

        fx.sampler.tick().await;
        fx.sampler.tick().await;

        assert_eq!(fx.hardware.writes_for(id), 1);
        assert_eq!(fx.store.get(id).unwrap().actuation, On);
    }

    #[tokio::test]
    async fn should_keep_intended_state_when_relay_write_fails() {
        let fx = fixture([Dark, Bright, Bright, Bright], &[]);
        fx.hardware.fail_writes(true);

        let switched = fx.sampler.tick().await;

        assert_eq!(switched.len(), 1);
        assert_eq!(fx.store.get(LightId::new(1)).unwrap().actuation, On);
    }

    #[tokio::test]
    async fn should_publish_reading_and_actuation_events() {
        let fx = fixture([Bright, Dark, Dark, Dark], &[LightId::new(4)]);

        fx.sampler.tick().await;

        let events = fx.publisher.events();
        assert!(events.iter().any(|e| e.light_id == LightId::new(1)
            && e.kind
                == EventKind::ReadingChanged {
                    from: Dark,
                    to: Bright
                }));
        assert!(events.iter().any(|e| e.light_id == LightId::new(2)
            && e.kind
                == EventKind::ActuationChanged {
                    from: Off,
                    to: On,
                    source: ChangeSource::Auto
                }));
        assert!(!events.iter().any(|e| e.light_id == LightId::new(4)));
    }

    #[tokio::test]
    async fn should_only_record_readings_when_auto_mode_is_off() {
        let store = Arc::new(LightStore::new(&[]));
        let hardware = Arc::new(FakeHardware::with_readings([Dark, Bright, Dark, Dark]));
        let sampler = SensorSampler::new(
            Arc::clone(&store),
            Arc::clone(&hardware),
            Arc::new(MonotonicClock::new()),
            Arc::new(RecordingPublisher::default()),
            DEFAULT_SAMPLE_INTERVAL,
        )
        .with_auto_mode(false);
        set_actuation(&store, [Off, On, Off, Off]);

        let switched = sampler.tick().await;

        assert!(switched.is_empty());
        assert!(hardware.writes().is_empty());
        assert_eq!(actuations(&store), vec![Off, On, Off, Off]);
        assert_eq!(store.get(LightId::new(2)).unwrap().reading, Bright);
    }

    /// Hardware that takes manual control of light 1 while light 4's sensor
    /// is being read, i.e. in the middle of a tick.
    struct CommandMidTick {
        inner: FakeHardware,
        store: Arc<LightStore>,
    }

    impl LightHardware for CommandMidTick {
        fn read_sensor(&self, id: LightId) -> SensorReading {
            if id == LightId::new(4) {
                self.store
                    .update(LightId::new(1), |record| {
                        record.actuation = Off;
                        record.override_state = OverrideState::Active {
                            expires_at: streetlight_domain::time::now(),
                        };
                    })
                    .unwrap();
            }
            self.inner.read_sensor(id)
        }

        fn set_actuator(
            &self,
            id: LightId,
            state: ActuationState,
        ) -> Result<(), crate::ports::HardwareError> {
            self.inner.set_actuator(id, state)
        }
    }

    #[tokio::test]
    async fn should_not_overwrite_command_landing_during_tick() {
        let store = Arc::new(LightStore::new(&[]));
        let hardware = Arc::new(CommandMidTick {
            inner: FakeHardware::with_readings([Dark, Dark, Dark, Dark]),
            store: Arc::clone(&store),
        });
        let sampler = SensorSampler::new(
            Arc::clone(&store),
            Arc::clone(&hardware),
            Arc::new(MonotonicClock::new()),
            Arc::new(RecordingPublisher::default()),
            DEFAULT_SAMPLE_INTERVAL,
        );

        let switched = sampler.tick().await;

        let light = store.get(LightId::new(1)).unwrap();
        assert_eq!(light.actuation, Off);
        assert!(light.override_state.is_active());
        assert_eq!(hardware.inner.writes_for(LightId::new(1)), 0);
        assert_eq!(switched.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_resume_automatic_control_after_override_expires() {
        let fx = fixture([Bright, Dark, Dark, Dark], &[]);
        let id = LightId::new(1);
        let manager = OverrideManager::new(
            Arc::clone(&fx.store),
            Arc::new(MonotonicClock::new()),
            Arc::clone(&fx.publisher),
            DEFAULT_OVERRIDE_DURATION,
        );
        let expires_at = fx
            .store
            .update(id, |record| {
                record.actuation = On;
                manager.activate(record)
            })
            .unwrap();
        manager.schedule_expiry(id, expires_at);

        fx.sampler.tick().await;
        assert_eq!(fx.store.get(id).unwrap().actuation, On);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(
            fx.store.get(id).unwrap().override_state,
            OverrideState::Inactive
        );

        fx.sampler.tick().await;
        assert_eq!(fx.store.get(id).unwrap().actuation, Off);
    }

    #[tokio::test(start_paused = true)]
    async fn should_tick_periodically_until_stopped() {
        let fx = fixture([Dark, Dark, Dark, Dark], &[]);
        let store = Arc::clone(&fx.store);
        let hardware = Arc::clone(&fx.hardware);

        let handle = fx.sampler.spawn();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.get(LightId::new(1)).unwrap().actuation, On);

        hardware.set_reading(LightId::new(1), Bright);
        tokio::time::sleep(DEFAULT_SAMPLE_INTERVAL).await;
        assert_eq!(store.get(LightId::new(1)).unwrap().actuation, Off);

        handle.stop().await;
        hardware.set_reading(LightId::new(1), Dark);
        tokio::time::sleep(DEFAULT_SAMPLE_INTERVAL * 3).await;
        assert_eq!(store.get(LightId::new(1)).unwrap().actuation, Off);
    }
}
