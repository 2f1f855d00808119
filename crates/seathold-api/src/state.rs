//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use seathold_core::config::AppConfig;
use seathold_lock::SeatLockManager;

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The seat lock manager
    pub manager: Arc<SeatLockManager>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates state around an existing manager.
    pub fn new(config: AppConfig, manager: Arc<SeatLockManager>) -> Self {
        Self {
            config: Arc::new(config),
            manager,
            started_at: Instant::now(),
        }
    }
}
