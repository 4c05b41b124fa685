//! Stub hardware and state builders shared by the handler tests.

use std::sync::{Arc, Mutex};

use axum::response::Response;

use streetlight_app::event_bus::InProcessEventBus;
use streetlight_app::override_manager::DEFAULT_OVERRIDE_DURATION;
use streetlight_app::ports::{HardwareError, LightHardware, MonotonicClock};
use streetlight_app::services::control_service::ControlService;
use streetlight_app::store::LightStore;
use streetlight_domain::id::LightId;
use streetlight_domain::light::{ActuationState, SensorReading};

use crate::state::AppState;

/// Hardware with dark sensors that remembers the last relay writes.
#[derive(Default)]
pub struct StubHardware {
    writes: Mutex<Vec<(LightId, ActuationState)>>,
}

impl StubHardware {
    pub fn relay(&self, id: LightId) -> Option<ActuationState> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(light, _)| *light == id)
            .map(|(_, state)| *state)
    }

    pub fn total_writes(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

impl LightHardware for StubHardware {
    fn read_sensor(&self, _id: LightId) -> SensorReading {
        SensorReading::Dark
    }

    fn set_actuator(&self, id: LightId, state: ActuationState) -> Result<(), HardwareError> {
        self.writes.lock().unwrap().push((id, state));
        Ok(())
    }
}

/// State with light 4 wired to a broken sensor.
pub fn test_state() -> (AppState<StubHardware, MonotonicClock>, Arc<StubHardware>) {
    let store = Arc::new(LightStore::new(&[LightId::new(4)]));
    let hardware = Arc::new(StubHardware::default());
    let event_bus = Arc::new(InProcessEventBus::new(16));
    let control = ControlService::new(
        store,
        Arc::clone(&hardware),
        Arc::new(MonotonicClock::new()),
        Arc::clone(&event_bus),
        DEFAULT_OVERRIDE_DURATION,
    );
    (AppState::new(Arc::new(control), event_bus), hardware)
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
