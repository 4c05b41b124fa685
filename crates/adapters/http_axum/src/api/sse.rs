//! Server-Sent Events (SSE) stream for real-time updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use streetlight_app::ports::{Clock, LightHardware};
use streetlight_domain::event::LightEvent;

use crate::state::AppState;

/// `GET /api/events/stream` — SSE stream of light events.
///
/// Subscribes to the event bus and sends each event as a JSON `data:` frame.
/// The stream continues until the client disconnects or the bus is closed.
pub async fn stream<H, C>(
    State(state): State<AppState<H, C>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    H: LightHardware + 'static,
    C: Clock + 'static,
{
    let event_rx = state.event_bus.subscribe();
    let event_stream = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => to_frame(&event).map(Ok::<_, std::convert::Infallible>),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

fn to_frame(event: &LightEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Event::default().data(json)),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize event for SSE stream");
            None
        }
    }
}
