//! # streetlight-app
//!
//! Application layer — the control coordinator and its **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LightHardware` — sensor reads and relay writes
//!   - `EventPublisher` — fan-out of light events
//!   - `Clock` — source of timestamps for override deadlines
//! - Own the shared per-light state ([`store::LightStore`]) behind a single
//!   atomic update primitive
//! - Run the periodic [`sampler::SensorSampler`] and the
//!   [`override_manager::OverrideManager`] expiry tasks
//! - Expose the **driving/inbound port** used by the control interface:
//!   [`services::control_service::ControlService`]
//! - Provide **in-process infrastructure** (event bus, monotonic clock) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `streetlight-domain` only (plus `tokio` for tasks, timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod override_manager;
pub mod ports;
pub mod sampler;
pub mod services;
pub mod store;

#[cfg(test)]
mod test_support;
