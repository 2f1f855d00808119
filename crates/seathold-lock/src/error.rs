//! Lock manager error taxonomy.
//!
//! Every variant is recoverable by the caller: retry, re-acquire, or surface
//! the reason to the end user.

use thiserror::Error;

use seathold_core::error::{AppError, ErrorKind};
use seathold_core::types::SeatId;

use crate::model::SeatConflict;

/// Failure of a lock manager operation. No variant leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// One or more requested seat ids do not exist.
    #[error("unknown seat ids: {}", join_ids(.0))]
    UnknownResource(Vec<SeatId>),
    /// One or more requested seats are reserved or locked by another party.
    #[error("{} requested seat(s) unavailable", .0.len())]
    Conflict(Vec<SeatConflict>),
    /// No lock exists for the token.
    #[error("lock token not found")]
    InvalidToken,
    /// The lock was past its TTL; it has been released.
    #[error("lock has expired")]
    Expired,
    /// A seat in the lock was reserved or re-locked since the lock was granted.
    #[error("seat state changed since the lock was granted")]
    ResourceStateChanged,
    /// The request named no seats.
    #[error("no seats requested")]
    EmptySelection,
}

impl LockError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownResource(_) => "unknown_resource",
            Self::Conflict(_) => "conflict",
            Self::InvalidToken => "invalid_token",
            Self::Expired => "expired",
            Self::ResourceStateChanged => "resource_state_changed",
            Self::EmptySelection => "empty_selection",
        }
    }

    /// Error category at the application boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownResource(_) | Self::InvalidToken => ErrorKind::NotFound,
            Self::Conflict(_) | Self::ResourceStateChanged => ErrorKind::Conflict,
            Self::Expired => ErrorKind::Expired,
            Self::EmptySelection => ErrorKind::Validation,
        }
    }
}

impl From<LockError> for AppError {
    fn from(err: LockError) -> Self {
        AppError::new(err.kind(), err.to_string())
    }
}

fn join_ids(ids: &[SeatId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
