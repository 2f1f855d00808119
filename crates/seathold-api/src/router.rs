//! Route definitions for the Seathold HTTP API.
//!
//! All routes are mounted under `/api` and receive `AppState` through
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(seat_routes())
        .merge(lock_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

fn seat_routes() -> Router<AppState> {
    Router::new().route("/seats", get(handlers::seats::list_seats))
}

/// Lock lifecycle: acquire, inspect, confirm, release
fn lock_routes() -> Router<AppState> {
    Router::new()
        .route("/locks", post(handlers::locks::acquire_lock))
        .route(
            "/locks/{token}",
            get(handlers::locks::get_lock).delete(handlers::locks::release_lock),
        )
        .route("/locks/{token}/confirm", post(handlers::locks::confirm_lock))
}
