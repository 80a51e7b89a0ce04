use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::constants::{INVALID_PAGE_ERROR, INVALID_SPIN_ERROR};
use shared::TrackerError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Tracker(TrackerError),
    Validation(validator::ValidationErrors),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tracker(e) => write!(f, "{}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tracker(e) => Some(e),
            Self::Validation(e) => Some(e),
        }
    }
}

impl From<TrackerError> for Error {
    fn from(err: TrackerError) -> Self {
        Self::Tracker(err)
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        tracing::warn!("Rejected request: {}", self);
        let (status, message) = match self {
            Self::Tracker(TrackerError::InvalidSpin(_) | TrackerError::InvalidSpinText(_)) => {
                (StatusCode::BAD_REQUEST, INVALID_SPIN_ERROR.to_string())
            }
            Self::Tracker(TrackerError::InvalidPageIndex(_)) => {
                (StatusCode::BAD_REQUEST, INVALID_PAGE_ERROR.to_string())
            }
            Self::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
