//! Application builder. Wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use seathold_core::config::{AppConfig, CorsConfig};
use seathold_core::AppResult;
use seathold_core::error::{AppError, ErrorKind};
use seathold_lock::SeatLockManager;
use seathold_worker::LockSweeper;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Runs the Seathold server until Ctrl+C.
///
/// Builds the seat pool, starts the sweeper when enabled, serves HTTP with
/// graceful shutdown, then stops the sweeper.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!(
        total_seats = config.seats.total,
        default_ttl_ms = config.seats.default_ttl_ms,
        "Initializing seat pool"
    );
    let manager = Arc::new(SeatLockManager::new(config.seats.total));

    let sweeper = if config.sweeper.enabled {
        let sweeper = LockSweeper::from_config(Arc::clone(&manager), &config.sweeper);
        Some(sweeper.spawn())
    } else {
        tracing::warn!("Lock sweeper disabled; expired locks are reclaimed lazily");
        None
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors = config.server.cors.clone();
    let app = build_app(AppState::new(config, manager), &cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Io, format!("Failed to bind {}", addr), e))?;

    tracing::info!("Seathold server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("HTTP server stopped");

    if let Some(handle) = sweeper {
        handle.shutdown().await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
