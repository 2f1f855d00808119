//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use seathold_core::types::SeatId;

/// Body of `POST /api/locks`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcquireLockRequest {
    /// Caller identity recorded on the lock.
    #[validate(length(min = 1, max = 255, message = "ownerId must be 1-255 characters"))]
    pub owner_id: String,
    /// Seats to lock together.
    #[validate(length(min = 1, message = "seatIds must not be empty"))]
    pub seat_ids: Vec<u32>,
    /// Lock lifetime in milliseconds; the configured default when absent.
    #[validate(range(min = 1, message = "ttlMs must be positive"))]
    pub ttl_ms: Option<u64>,
}

impl AcquireLockRequest {
    /// Requested ids as seat identifiers.
    pub fn seat_ids(&self) -> Vec<SeatId> {
        self.seat_ids.iter().copied().map(SeatId).collect()
    }
}

/// Query string of `GET /api/seats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSeatsQuery {
    /// Include live lock details on each seat.
    #[serde(default)]
    pub include_locks: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let valid: AcquireLockRequest = serde_json::from_value(serde_json::json!({
            "ownerId": "alice",
            "seatIds": [1, 2],
        }))
        .unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.seat_ids(), vec![SeatId(1), SeatId(2)]);

        let blank_owner = AcquireLockRequest {
            owner_id: String::new(),
            ..valid.clone()
        };
        assert!(blank_owner.validate().is_err());

        let no_seats = AcquireLockRequest {
            seat_ids: Vec::new(),
            ..valid.clone()
        };
        assert!(no_seats.validate().is_err());

        let zero_ttl = AcquireLockRequest {
            ttl_ms: Some(0),
            ..valid
        };
        assert!(zero_ttl.validate().is_err());
    }
}
