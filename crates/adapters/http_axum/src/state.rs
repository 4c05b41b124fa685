//! Shared application state for axum handlers.

use std::sync::Arc;

use streetlight_app::event_bus::InProcessEventBus;
use streetlight_app::ports::{Clock, LightHardware};
use streetlight_app::services::control_service::ControlService;

/// Control service specialised to the in-process event bus.
pub type Control<H, C> = ControlService<H, C, InProcessEventBus>;

/// Application state shared across all axum handlers.
///
/// Generic over the hardware and clock types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<H, C> {
    /// Manual commands and status snapshots.
    pub control: Arc<Control<H, C>>,
    /// Event bus for SSE subscriptions.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<H, C> Clone for AppState<H, C> {
    fn clone(&self) -> Self {
        Self {
            control: Arc::clone(&self.control),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<H, C> AppState<H, C>
where
    H: LightHardware + 'static,
    C: Clock + 'static,
{
    /// Create the state from services already shared with background tasks.
    pub fn new(control: Arc<Control<H, C>>, event_bus: Arc<InProcessEventBus>) -> Self {
        Self { control, event_bus }
    }
}
