//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seathold_core::types::{LockToken, SeatId};
use seathold_lock::PoolState;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Seat pool counters.
    pub pool: PoolState,
}

/// Successful lock acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireLockResponse {
    pub ok: bool,
    pub token: LockToken,
    pub expires_at: DateTime<Utc>,
    pub seat_ids: Vec<SeatId>,
}

/// Successful confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmLockResponse {
    pub ok: bool,
    pub confirmed_resource_ids: Vec<SeatId>,
}

/// Release outcome. `released` is false when no lock matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseLockResponse {
    pub ok: bool,
    pub released: bool,
}
