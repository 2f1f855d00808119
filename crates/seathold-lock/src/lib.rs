//! # seathold-lock
//!
//! Grants short-lived, mutually exclusive holds on seats and lets exactly
//! one holder convert a hold into a permanent reservation.
//!
//! All state lives in a [`SeatLockManager`] behind a single mutex, so every
//! operation (acquire, confirm, release, sweep, snapshot) is one critical
//! section. The manager performs no I/O and never blocks beyond that lock.

pub mod error;
pub mod manager;
pub mod model;

pub use error::LockError;
pub use manager::SeatLockManager;
pub use model::{
    ConflictReason, Lock, LockGrant, LockView, PoolState, Seat, SeatConflict, SeatView,
};
