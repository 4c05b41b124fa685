//! Event bus port — publish/subscribe for light events.

use std::future::Future;

use streetlight_domain::event::LightEvent;

/// Publishes light events to interested subscribers.
///
/// Publishing is fire-and-forget: a missing subscriber is not an error.
pub trait EventPublisher: Send + Sync {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: LightEvent) -> impl Future<Output = ()> + Send;
}
