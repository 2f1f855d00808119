//! Integration tests for the lock lifecycle over HTTP.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_lock_then_confirm_reserves_seats() {
    let app = helpers::TestApp::new();
    let token = app.lock("alice", &[1, 2], None).await;

    let response = app
        .request("POST", &format!("/api/locks/{}/confirm", token), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);
    assert_eq!(response.body["confirmedResourceIds"], json!([1, 2]));

    let seats = app.request("GET", "/api/seats", None).await;
    assert_eq!(seats.status, StatusCode::OK);
    assert_eq!(seats.body[0]["holderId"], "alice");
    assert_eq!(seats.body[1]["holderId"], "alice");
    assert!(seats.body[2].get("holderId").is_none());
}

#[tokio::test]
async fn test_overlapping_request_is_rejected_with_conflicts() {
    let app = helpers::TestApp::new();
    app.lock("alice", &[3], None).await;

    let response = app
        .request(
            "POST",
            "/api/locks",
            Some(json!({ "ownerId": "bob", "seatIds": [3, 4] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["ok"], false);
    assert_eq!(response.body["error"], "conflict");
    assert_eq!(
        response.body["conflicts"],
        json!([{ "resourceId": 3, "reason": "locked", "heldBy": "alice" }])
    );

    // Seat 4 stays free: bob can take it alone.
    app.lock("bob", &[4], None).await;
}

#[tokio::test]
async fn test_reserved_seat_reports_already_reserved() {
    let app = helpers::TestApp::new();
    let token = app.lock("alice", &[7], None).await;
    app.request("POST", &format!("/api/locks/{}/confirm", token), None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/locks",
            Some(json!({ "ownerId": "bob", "seatIds": [7] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["conflicts"][0]["reason"], "already_reserved");
}

#[tokio::test]
async fn test_unknown_seats_are_listed() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/locks",
            Some(json!({ "ownerId": "alice", "seatIds": [99, 1, 0] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "unknown_resource");
    assert_eq!(response.body["unknownResource"], json!([0, 99]));
    assert_eq!(app.manager.pool_state().locked, 0);
}

#[tokio::test]
async fn test_invalid_lock_requests_are_rejected() {
    let app = helpers::TestApp::new();
    let too_long = app.config.seats.max_ttl_ms + 1;

    let bodies = [
        json!({ "ownerId": "", "seatIds": [1] }),
        json!({ "ownerId": "alice", "seatIds": [] }),
        json!({ "ownerId": "alice", "seatIds": [1], "ttlMs": 0 }),
        json!({ "ownerId": "alice", "seatIds": [1], "ttlMs": too_long }),
        json!({ "ownerId": "alice", "seatIds": [-1] }),
        json!({ "seatIds": [1] }),
        json!({ "ownerId": "alice", "seatIds": [1], "ttlMs": -5 }),
    ];

    for body in bodies {
        let response = app.request("POST", "/api/locks", Some(body.clone())).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(response.body["ok"], false, "body: {}", body);
        assert_eq!(response.body["error"], "validation_error");
        assert!(response.body["message"].is_string(), "body: {}", body);
    }

    let response = app.request("GET", "/api/seats?includeLocks=yes", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["ok"], false);
    assert_eq!(response.body["error"], "validation_error");
    assert!(response.body["message"].is_string());

    assert_eq!(app.manager.pool_state().locked, 0);
}

#[tokio::test]
async fn test_confirm_expired_lock_returns_gone_once() {
    let app = helpers::TestApp::new();
    let token = app.lock("alice", &[5], Some(1)).await;

    tokio::time::sleep(Duration::from_millis(20)).await;

    let path = format!("/api/locks/{}/confirm", token);
    let response = app.request("POST", &path, None).await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.body["reason"], "expired");

    let response = app.request("POST", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["reason"], "invalid_token");

    // The seat was never reserved.
    app.lock("bob", &[5], None).await;
}

#[tokio::test]
async fn test_confirm_superseded_lock_reports_state_change() {
    let app = helpers::TestApp::new();
    let first = app.lock("alice", &[6], None).await;
    let second = app.lock("alice", &[6], None).await;

    let response = app
        .request("POST", &format!("/api/locks/{}/confirm", first), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["reason"], "resource_state_changed");

    let response = app
        .request("POST", &format!("/api/locks/{}/confirm", second), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_confirm_unknown_or_malformed_token() {
    let app = helpers::TestApp::new();

    for token in ["00000000-0000-0000-0000-000000000000", "not-a-token"] {
        let response = app
            .request("POST", &format!("/api/locks/{}/confirm", token), None)
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["ok"], false);
        assert_eq!(response.body["reason"], "invalid_token");
    }
}

#[tokio::test]
async fn test_release_is_idempotent() {
    let app = helpers::TestApp::new();
    let token = app.lock("alice", &[8, 9], None).await;
    let path = format!("/api/locks/{}", token);

    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true, "released": true }));

    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["released"], false);

    let response = app.request("DELETE", "/api/locks/garbage", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["released"], false);

    app.lock("bob", &[8, 9], None).await;
}

#[tokio::test]
async fn test_lock_info_reports_owner_and_expiry() {
    let app = helpers::TestApp::new();
    let token = app.lock("alice", &[2, 1], None).await;

    let response = app
        .request("GET", &format!("/api/locks/{}", token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token"], token.as_str());
    assert_eq!(response.body["ownerId"], "alice");
    assert_eq!(response.body["seatIds"], json!([1, 2]));
    assert_eq!(response.body["expired"], false);

    let response = app.request("GET", "/api/locks/not-a-token", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_lock_is_reclaimed_by_another_owner() {
    let app = helpers::TestApp::new();
    let stale = app.lock("alice", &[4], Some(1)).await;

    tokio::time::sleep(Duration::from_millis(20)).await;

    let fresh = app.lock("bob", &[4], None).await;
    let response = app
        .request("POST", &format!("/api/locks/{}/confirm", fresh), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", &format!("/api/locks/{}/confirm", stale), None)
        .await;
    assert_eq!(response.status, StatusCode::GONE);
}
