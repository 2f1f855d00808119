//! Seat inventory configuration.

use serde::{Deserialize, Serialize};

/// Seat inventory and lock time-to-live settings.
///
/// The seat set is fixed at startup: ids `1..=total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatsConfig {
    /// Number of seats.
    #[serde(default = "default_total")]
    pub total: u32,
    /// TTL applied when a lock request omits one, in milliseconds.
    #[serde(default = "default_ttl")]
    pub default_ttl_ms: u64,
    /// Largest TTL a client may request, in milliseconds.
    #[serde(default = "default_max_ttl")]
    pub max_ttl_ms: u64,
}

impl Default for SeatsConfig {
    fn default() -> Self {
        Self {
            total: default_total(),
            default_ttl_ms: default_ttl(),
            max_ttl_ms: default_max_ttl(),
        }
    }
}

fn default_total() -> u32 {
    100
}

fn default_ttl() -> u64 {
    30_000
}

fn default_max_ttl() -> u64 {
    600_000
}
