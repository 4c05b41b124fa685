//! Light state store — the single source of truth for every light.
//!
//! Each record sits behind its own lock. All mutation goes through
//! [`LightStore::update`], which runs a closure against one record while
//! holding that record's lock: callers never keep a writable reference
//! beyond the closure, and never across an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use streetlight_domain::error::UnknownLightError;
use streetlight_domain::id::LightId;
use streetlight_domain::light::{LightRecord, SensorReading};

struct Slot {
    record: Mutex<LightRecord>,
    /// The sensor is wired to a broken input and must always read faulted.
    sensor_faulted: bool,
}

impl Slot {
    fn lock(&self) -> MutexGuard<'_, LightRecord> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Concurrency-safe state for the fixed set of lights.
pub struct LightStore {
    slots: Vec<Slot>,
}

impl LightStore {
    /// Create the store with every light `Off`, reading `Dark`, and no
    /// override. Lights listed in `faulted_sensors` start (and stay) `Faulted`.
    #[must_use]
    pub fn new(faulted_sensors: &[LightId]) -> Self {
        let slots = LightId::all()
            .map(|id| {
                let sensor_faulted = faulted_sensors.contains(&id);
                let record = if sensor_faulted {
                    LightRecord::faulted()
                } else {
                    LightRecord::new()
                };
                Slot {
                    record: Mutex::new(record),
                    sensor_faulted,
                }
            })
            .collect();
        Self { slots }
    }

    /// Number of configured lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Configured light ids, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = LightId> + '_ {
        LightId::all().take(self.slots.len())
    }

    /// Snapshot of one light's record.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLightError`] if `id` is not configured.
    pub fn get(&self, id: LightId) -> Result<LightRecord, UnknownLightError> {
        Ok(*self.slot(id)?.lock())
    }

    /// Snapshot of every light, ordered by id.
    #[must_use]
    pub fn get_all(&self) -> Vec<(LightId, LightRecord)> {
        self.ids()
            .zip(self.slots.iter())
            .map(|(id, slot)| (id, *slot.lock()))
            .collect()
    }

    /// Atomically read-modify-write one light's record.
    ///
    /// The closure runs with the record locked; concurrent updates of the
    /// same light are serialized, updates of different lights are not.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLightError`] if `id` is not configured. The closure
    /// is not called in that case.
    pub fn update<T>(
        &self,
        id: LightId,
        mutator: impl FnOnce(&mut LightRecord) -> T,
    ) -> Result<T, UnknownLightError> {
        let slot = self.slot(id)?;
        let mut record = slot.lock();
        Ok(mutator(&mut record))
    }

    /// Store a fresh sensor reading, returning `(previous, stored)`.
    ///
    /// Lights wired to a broken sensor keep reading `Faulted` whatever the
    /// hardware reports, so `stored` may differ from `reading`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLightError`] if `id` is not configured.
    pub fn record_reading(
        &self,
        id: LightId,
        reading: SensorReading,
    ) -> Result<(SensorReading, SensorReading), UnknownLightError> {
        let reading = if self.slot(id)?.sensor_faulted {
            SensorReading::Faulted
        } else {
            reading
        };
        self.update(id, |record| {
            (std::mem::replace(&mut record.reading, reading), reading)
        })
    }

    fn slot(&self, id: LightId) -> Result<&Slot, UnknownLightError> {
        id.index()
            .and_then(|index| self.slots.get(index))
            .ok_or_else(|| id.into())
    }
}

impl Default for LightStore {
    fn default() -> Self {
        Self::new(&[])
    }
}
