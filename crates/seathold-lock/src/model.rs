//! Seat, lock, and snapshot types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seathold_core::types::{LockToken, SeatId};

/// A reservable seat.
///
/// `holder_id` is set exactly when the seat has been confirmed; a seat never
/// goes back to unreserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    /// Seat number.
    pub id: SeatId,
    /// Party holding the permanent reservation.
    pub holder_id: Option<String>,
    /// When the reservation was confirmed.
    pub reserved_at: Option<DateTime<Utc>>,
}

impl Seat {
    /// Creates an unreserved seat.
    pub fn new(id: SeatId) -> Self {
        Self {
            id,
            holder_id: None,
            reserved_at: None,
        }
    }

    /// Whether the seat has been confirmed.
    pub fn is_reserved(&self) -> bool {
        self.holder_id.is_some()
    }
}

/// A time-bounded hold on one or more seats.
///
/// Immutable once created; it is only ever deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lock {
    /// Token proving ownership.
    pub token: LockToken,
    /// Requesting party.
    pub owner_id: String,
    /// Covered seats, ascending and without duplicates.
    pub seat_ids: Vec<SeatId>,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl Lock {
    /// A lock is expired from its `expires_at` instant onwards.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Why a requested seat could not be locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    /// The seat is permanently reserved.
    AlreadyReserved,
    /// The seat is covered by another party's live lock.
    Locked,
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyReserved => write!(f, "already_reserved"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// Per-seat conflict reported by a failed acquire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatConflict {
    /// The unavailable seat.
    #[serde(rename = "resourceId")]
    pub seat_id: SeatId,
    /// Why it is unavailable.
    pub reason: ConflictReason,
    /// The reservation holder or the lock owner.
    pub held_by: String,
}

/// Result of a successful acquire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockGrant {
    /// Freshly minted token.
    pub token: LockToken,
    /// Seats covered by the new lock.
    pub seat_ids: Vec<SeatId>,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Read-only view of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    /// Seat number.
    pub id: SeatId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_holder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_token: Option<LockToken>,
}

/// Read-only view of one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockView {
    pub token: LockToken,
    pub owner_id: String,
    pub seat_ids: Vec<SeatId>,
    pub expires_at: DateTime<Utc>,
    /// Past its TTL but not yet swept.
    pub expired: bool,
}

/// Occupancy summary of the seat pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolState {
    /// Number of seats.
    pub total: u32,
    /// Confirmed seats.
    pub reserved: u32,
    /// Seats covered by a live lock.
    pub locked: u32,
    /// Seats neither reserved nor locked.
    pub available: u32,
    /// Locks in the lock table, including expired ones awaiting a sweep.
    pub active_locks: u32,
}
