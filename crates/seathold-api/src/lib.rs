//! # seathold-api
//!
//! HTTP transport for the seat lock manager, built on Axum.
//!
//! Owns request parsing and validation, response encoding, status-code
//! mapping, and the wiring of the background sweeper.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
