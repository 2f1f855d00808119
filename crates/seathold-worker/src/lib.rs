//! Background maintenance tasks for Seathold.
//!
//! Currently a single periodic task: the expired-lock sweeper.

pub mod sweeper;

pub use sweeper::{LockSweeper, SweeperHandle};
