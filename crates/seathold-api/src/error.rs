//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use seathold_core::error::{AppError, ErrorKind};
use seathold_core::types::SeatId;
use seathold_lock::{LockError, SeatConflict};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub ok: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Lock failure reason, same vocabulary as `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Per-seat conflicts of a rejected lock request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<SeatConflict>>,
    /// Seat ids that do not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_resource: Option<Vec<SeatId>>,
}

/// Error type returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Generic application error.
    App(AppError),
    /// Lock manager rejection.
    Lock(LockError),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<LockError> for ApiError {
    fn from(err: LockError) -> Self {
        Self::Lock(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::App(AppError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::App(AppError::validation(rejection.body_text()))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::App(AppError::validation(err.to_string()))
    }
}

fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "validation_error"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "conflict"),
        ErrorKind::Expired => (StatusCode::GONE, "expired"),
        ErrorKind::Internal
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Io => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::App(err) => {
                let (status, code) = status_for(err.kind);
                if status.is_server_error() {
                    tracing::error!(error = %err, "Internal server error");
                }
                let body = ApiErrorResponse {
                    ok: false,
                    error: code.to_string(),
                    reason: None,
                    message: err.message,
                    conflicts: None,
                    unknown_resource: None,
                };
                (status, Json(body)).into_response()
            }
            ApiError::Lock(err) => {
                let (status, _) = status_for(err.kind());
                let message = err.to_string();
                let code = match &err {
                    LockError::EmptySelection => "validation_error",
                    other => other.code(),
                };
                let (conflicts, unknown_resource) = match err {
                    LockError::Conflict(conflicts) => (Some(conflicts), None),
                    LockError::UnknownResource(ids) => (None, Some(ids)),
                    _ => (None, None),
                };
                let body = ApiErrorResponse {
                    ok: false,
                    error: code.to_string(),
                    reason: Some(code.to_string()),
                    message,
                    conflicts,
                    unknown_resource,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
