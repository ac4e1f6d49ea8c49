//! Mapping of service errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::AnalysisError;

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Analysis(AnalysisError),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError::Analysis(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let (status, message) = match self {
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ApiError::Analysis(err) => {
                let status = match &err {
                    AnalysisError::InvalidSensorType(_)
                    | AnalysisError::InvalidUserId(_)
                    | AnalysisError::InvalidValue(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    AnalysisError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                };
                if status.is_server_error() {
                    error!("Request failed: {}", err);
                } else {
                    warn!("Rejected request: {}", err);
                }
                (status, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
