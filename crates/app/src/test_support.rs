//! In-memory port implementations shared by the unit tests.

use std::sync::Mutex;

use streetlight_domain::event::LightEvent;
use streetlight_domain::id::{LIGHT_COUNT, LightId};
use streetlight_domain::light::{ActuationState, SensorReading};
use streetlight_domain::time::Timestamp;

use crate::ports::{Clock, EventPublisher, HardwareError, LightHardware};

/// Hardware stub with scripted readings and a log of relay writes.
pub struct FakeHardware {
    readings: Mutex<Vec<SensorReading>>,
    writes: Mutex<Vec<(LightId, ActuationState)>>,
    failing: Mutex<bool>,
}

impl Default for FakeHardware {
    fn default() -> Self {
        Self::with_readings([SensorReading::Dark; LIGHT_COUNT as usize])
    }
}

impl FakeHardware {
    pub fn with_readings(readings: [SensorReading; LIGHT_COUNT as usize]) -> Self {
        Self {
            readings: Mutex::new(readings.to_vec()),
            writes: Mutex::new(Vec::new()),
            failing: Mutex::new(false),
        }
    }

    pub fn set_reading(&self, id: LightId, reading: SensorReading) {
        let index = id.index().unwrap();
        self.readings.lock().unwrap()[index] = reading;
    }

    pub fn writes(&self) -> Vec<(LightId, ActuationState)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn writes_for(&self, id: LightId) -> usize {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(light, _)| *light == id)
            .count()
    }

    pub fn fail_writes(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

impl LightHardware for FakeHardware {
    fn read_sensor(&self, id: LightId) -> SensorReading {
        id.index()
            .and_then(|index| self.readings.lock().unwrap().get(index).copied())
            .unwrap_or(SensorReading::Faulted)
    }

    fn set_actuator(&self, id: LightId, state: ActuationState) -> Result<(), HardwareError> {
        self.writes.lock().unwrap().push((id, state));
        if *self.failing.lock().unwrap() {
            return Err(HardwareError::NotWired(id));
        }
        Ok(())
    }
}

/// Publisher that keeps every event.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<LightEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<LightEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: LightEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(streetlight_domain::time::now()),
        }
    }

    pub fn advance(&self, duration: std::time::Duration) {
        let mut now = self.now.lock().unwrap();
        *now = streetlight_domain::time::deadline(*now, duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}
