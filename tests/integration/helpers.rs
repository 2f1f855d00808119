//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use seathold_api::{AppState, build_app};
use seathold_core::config::AppConfig;
use seathold_lock::SeatLockManager;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The manager behind the router, for direct inspection
    pub manager: Arc<SeatLockManager>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application with a pool of ten seats and no sweeper
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.seats.total = 10;
        config.sweeper.enabled = false;
        Self::with_config(config)
    }

    /// Create a test application from an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let manager = Arc::new(SeatLockManager::new(config.seats.total));
        let state = AppState::new(config.clone(), Arc::clone(&manager));
        let router = build_app(state, &config.server.cors);

        Self {
            router,
            manager,
            config,
        }
    }

    /// Acquire a lock over HTTP and return its token
    pub async fn lock(&self, owner: &str, seats: &[u32], ttl_ms: Option<u64>) -> String {
        let mut body = serde_json::json!({
            "ownerId": owner,
            "seatIds": seats,
        });
        if let Some(ttl) = ttl_ms {
            body["ttlMs"] = ttl.into();
        }

        let response = self.request("POST", "/api/locks", Some(body)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Lock failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in lock response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
