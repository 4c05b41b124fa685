//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use streetlight_domain::error::{InvalidCommandError, StreetlightError, UnknownLightError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

/// Maps domain errors and rejected request bodies to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Domain(StreetlightError),
    MalformedBody(JsonRejection),
    MalformedPath(PathRejection),
}

impl From<StreetlightError> for ApiError {
    fn from(err: StreetlightError) -> Self {
        Self::Domain(err)
    }
}

impl From<InvalidCommandError> for ApiError {
    fn from(err: InvalidCommandError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<UnknownLightError> for ApiError {
    fn from(err: UnknownLightError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        Self::MalformedBody(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        Self::MalformedPath(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Domain(StreetlightError::UnknownLight(err)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Domain(StreetlightError::InvalidCommand(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::MalformedBody(err) => (StatusCode::BAD_REQUEST, err.body_text()),
            Self::MalformedPath(err) => (StatusCode::BAD_REQUEST, err.body_text()),
        };
        tracing::debug!(status = status.as_u16(), %message, "request rejected");

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}
