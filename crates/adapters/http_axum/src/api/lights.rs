//! JSON handlers for light status and manual control.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use streetlight_app::ports::{Clock, LightHardware};
use streetlight_domain::id::LightId;
use streetlight_domain::light::{ActuationState, LightRecord, SensorReading};
use streetlight_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// Who currently decides a light's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Auto,
    Manual,
}

/// One light as reported to clients.
#[derive(Debug, Serialize)]
pub struct LightView {
    pub id: LightId,
    pub status: ActuationState,
    pub reading: SensorReading,
    pub mode: Mode,
    pub override_expires_at: Option<Timestamp>,
}

impl LightView {
    fn new(id: LightId, record: &LightRecord) -> Self {
        let override_expires_at = record.override_state.expires_at();
        Self {
            id,
            status: record.actuation,
            reading: record.reading,
            mode: if override_expires_at.is_some() {
                Mode::Manual
            } else {
                Mode::Auto
            },
            override_expires_at,
        }
    }
}

/// Body of `GET /api/data`.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub time: Timestamp,
    pub lights: Vec<LightView>,
}

/// Body of `POST /control`.
#[derive(Debug, Deserialize)]
pub struct ControlRequest {
    pub light_id: u32,
    pub action: String,
}

/// Successful reply to `POST /control`.
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub success: bool,
    pub light_id: u32,
    pub action: String,
    pub new_status: ActuationState,
    pub message: String,
}

/// `GET /api/data`
pub async fn data<H, C>(State(state): State<AppState<H, C>>) -> Json<DataResponse>
where
    H: LightHardware + 'static,
    C: Clock + 'static,
{
    let lights = state
        .control
        .snapshot()
        .iter()
        .map(|(id, record)| LightView::new(*id, record))
        .collect();
    Json(DataResponse {
        success: true,
        time: state.control.now(),
        lights,
    })
}

/// `GET /api/lights/{id}`
pub async fn get<H, C>(
    State(state): State<AppState<H, C>>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<LightView>, ApiError>
where
    H: LightHardware + 'static,
    C: Clock + 'static,
{
    let Path(id) = id?;
    let id = LightId::try_from(id)?;
    let record = state.control.light(id)?;
    Ok(Json(LightView::new(id, &record)))
}

/// `POST /control`
pub async fn control<H, C>(
    State(state): State<AppState<H, C>>,
    body: Result<Json<ControlRequest>, JsonRejection>,
) -> Result<Json<ControlResponse>, ApiError>
where
    H: LightHardware + 'static,
    C: Clock + 'static,
{
    let Json(request) = body?;
    let new_status = state
        .control
        .submit(request.light_id, &request.action)
        .await?;
    let message = format!(
        "Light {} turned {} (manual override for {}s)",
        request.light_id,
        new_status,
        state.control.override_duration().as_secs()
    );
    Ok(Json(ControlResponse {
        success: true,
        light_id: request.light_id,
        action: new_status.to_string(),
        new_status,
        message,
    }))
}
