//! Expired-lock sweeper configuration.

use serde::{Deserialize, Serialize};

/// Background sweeper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweeper runs. Expiry is still enforced on every
    /// acquire and confirm when disabled; only memory reclamation stops.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval between sweeps in milliseconds.
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    1_000
}
