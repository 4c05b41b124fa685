//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod lights;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};

use streetlight_app::ports::{Clock, LightHardware};

use crate::state::AppState;

/// Build the API routes.
///
/// Paths are absolute: the control endpoint lives at `/control` rather than
/// under `/api`, matching what existing dashboards post to.
pub fn routes<H, C>() -> Router<AppState<H, C>>
where
    H: LightHardware + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/data", get(lights::data::<H, C>))
        .route("/api/lights/{id}", get(lights::get::<H, C>))
        .route("/control", post(lights::control::<H, C>))
        .route("/api/events/stream", get(sse::stream::<H, C>))
}
