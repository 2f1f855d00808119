//! Integration tests for seat listing and health reporting.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_reports_pool_counters() {
    let app = helpers::TestApp::new();
    let token = app.lock("alice", &[1, 2], None).await;
    app.request("POST", &format!("/api/locks/{}/confirm", token), None)
        .await;
    app.lock("bob", &[3], None).await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
    let pool = &response.body["pool"];
    assert_eq!(pool["total"], 10);
    assert_eq!(pool["reserved"], 2);
    assert_eq!(pool["locked"], 1);
    assert_eq!(pool["available"], 7);
    assert_eq!(pool["activeLocks"], 1);
}

#[tokio::test]
async fn test_seat_list_covers_whole_pool_in_order() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/seats", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let seats = response.body.as_array().expect("seat list");
    assert_eq!(seats.len(), 10);
    let ids: Vec<u64> = seats.iter().filter_map(|s| s["id"].as_u64()).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_lock_details_only_when_requested() {
    let app = helpers::TestApp::new();
    let token = app.lock("alice", &[5], None).await;

    let plain = app.request("GET", "/api/seats", None).await;
    assert!(plain.body[4].get("lockHolderId").is_none());

    let detailed = app.request("GET", "/api/seats?includeLocks=true", None).await;
    assert_eq!(detailed.body[4]["lockHolderId"], "alice");
    assert_eq!(detailed.body[4]["lockToken"], token.as_str());
    assert!(detailed.body[4]["lockExpiresAt"].is_string());
    assert!(detailed.body[5].get("lockHolderId").is_none());
}

#[tokio::test]
async fn test_expired_locks_are_hidden_from_listing() {
    let app = helpers::TestApp::new();
    app.lock("alice", &[6], Some(1)).await;

    tokio::time::sleep(Duration::from_millis(20)).await;

    let response = app.request("GET", "/api/seats?includeLocks=true", None).await;
    assert!(response.body[5].get("lockHolderId").is_none());

    let health = app.request("GET", "/api/health", None).await;
    assert_eq!(health.body["pool"]["locked"], 0);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/tickets", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
