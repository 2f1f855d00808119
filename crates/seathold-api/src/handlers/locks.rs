//! Lock lifecycle handlers: acquire, inspect, confirm, release.

use std::time::Duration;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use seathold_core::error::AppError;
use seathold_core::types::LockToken;
use seathold_lock::{LockError, LockView};

use crate::dto::request::AcquireLockRequest;
use crate::dto::response::{AcquireLockResponse, ConfirmLockResponse, ReleaseLockResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/locks
pub async fn acquire_lock(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AcquireLockRequest>,
) -> Result<(StatusCode, Json<AcquireLockResponse>), ApiError> {
    let seats = &state.config.seats;
    let ttl_ms = req.ttl_ms.unwrap_or(seats.default_ttl_ms);
    if ttl_ms > seats.max_ttl_ms {
        return Err(AppError::validation(format!(
            "ttlMs must not exceed {}",
            seats.max_ttl_ms
        ))
        .into());
    }

    let grant = state.manager.acquire(
        &req.owner_id,
        &req.seat_ids(),
        Duration::from_millis(ttl_ms),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(AcquireLockResponse {
            ok: true,
            token: grant.token,
            expires_at: grant.expires_at,
            seat_ids: grant.seat_ids,
        }),
    ))
}

/// GET /api/locks/{token}
pub async fn get_lock(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<LockView>, ApiError> {
    let view = parse_token(&token)
        .and_then(|token| state.manager.lock_info(&token))
        .ok_or(LockError::InvalidToken)?;
    Ok(Json(view))
}

/// POST /api/locks/{token}/confirm
pub async fn confirm_lock(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ConfirmLockResponse>, ApiError> {
    let token = parse_token(&token).ok_or(LockError::InvalidToken)?;
    let confirmed = state.manager.confirm(&token)?;
    Ok(Json(ConfirmLockResponse {
        ok: true,
        confirmed_resource_ids: confirmed,
    }))
}

/// DELETE /api/locks/{token}
pub async fn release_lock(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Json<ReleaseLockResponse> {
    let released = parse_token(&token)
        .map(|token| state.manager.release(&token))
        .unwrap_or(false);
    Json(ReleaseLockResponse { ok: true, released })
}

// A token that is not a UUID can never match a lock.
fn parse_token(raw: &str) -> Option<LockToken> {
    raw.parse().ok()
}
