//! Periodic release of expired seat locks.
//!
//! Acquire and confirm check expiry on their own, so the sweeper only
//! reclaims memory and frees index entries early. Stopping it never
//! affects correctness.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use seathold_core::config::SweeperConfig;
use seathold_core::AppResult;
use seathold_core::error::AppError;
use seathold_lock::SeatLockManager;

/// Service that periodically sweeps expired locks.
#[derive(Debug)]
pub struct LockSweeper {
    /// Lock manager to sweep.
    manager: Arc<SeatLockManager>,
    /// Sweep interval.
    interval: Duration,
}

impl LockSweeper {
    /// Create a new sweeper.
    pub fn new(manager: Arc<SeatLockManager>, interval: Duration) -> Self {
        Self { manager, interval }
    }

    /// Create a sweeper using the configured interval.
    pub fn from_config(manager: Arc<SeatLockManager>, config: &SweeperConfig) -> Self {
        Self::new(manager, Duration::from_millis(config.interval_ms))
    }

    /// Run the sweep loop until `cancel` flips to `true` or its sender is dropped.
    pub async fn run(&self, cancel: watch::Receiver<bool>) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            "Lock sweeper started"
        );

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cancel = cancel;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let swept = self.manager.sweep();
                    if swept > 0 {
                        tracing::info!(swept = swept, "Expired locks released");
                    } else {
                        tracing::trace!("Sweep found no expired locks");
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Lock sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Spawn the sweep loop on the current Tokio runtime.
    pub fn spawn(self) -> SweeperHandle {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(async move { self.run(cancel_rx).await });
        SweeperHandle { cancel_tx, task }
    }
}

/// Handle to a running sweeper; cancellation is explicit.
#[derive(Debug)]
pub struct SweeperHandle {
    /// Shutdown signal.
    cancel_tx: watch::Sender<bool>,
    /// The spawned loop.
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for it to exit.
    pub async fn shutdown(self) -> AppResult<()> {
        let _ = self.cancel_tx.send(true);
        self.task
            .await
            .map_err(|e| AppError::internal(format!("Lock sweeper task failed: {}", e)))
    }
}
