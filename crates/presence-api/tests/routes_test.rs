//! HTTP route integration tests.
//!
//! Run with: `cargo test -p presence-api --test routes_test`

mod helpers;

use axum::http::StatusCode;
use helpers::storage::UnreachableStorage;
use helpers::{devices_seen, setup_test_app, setup_test_app_with, wait_until, SECRET, VALIDATOR};
use std::sync::Arc;

#[tokio::test]
async fn test_validator_handshake() {
    let app = setup_test_app().await;

    let response = app.client().get("/").await;

    response.assert_status_ok();
    assert_eq!(response.text(), VALIDATOR);
    assert_eq!(
        response.header("content-type"),
        "text/plain; charset=utf8"
    );
}

#[tokio::test]
async fn test_healthz_returns_no_content() {
    let app = setup_test_app().await;

    let response = app.client().get("/healthz").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_plain_404() {
    let app = setup_test_app().await;

    for response in [
        app.client().get("/nope").await,
        app.client().put("/").await,
        app.client().post("/healthz").await,
    ] {
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "404 - Not Found");
    }
}

#[tokio::test]
async fn test_scan_batch_is_accepted_and_stored() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/")
        .add_header("Content-Type", "application/json")
        .text(devices_seen(SECRET, "aa:bb:cc:dd:ee:ff"))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    let stats = app.app_state.stats.clone();
    wait_until(|| stats.snapshot().persisted == 1).await;

    let path = app
        .bucket_dir()
        .join("2024-01-01T00:00:00Z-aa:bb:cc:dd:ee:ff.json");
    let stored: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).expect("object written")).unwrap();

    assert_eq!(stored["apMac"], "aa:bb:cc:dd:ee:ff");
    assert_eq!(stored["tenant"], "tata");
    assert_eq!(stored["apFloors"][0], "Floor 1");
    assert_eq!(stored["observations"][0]["clientMac"], "11:22:33:44:55:66");
    assert_eq!(stored["observations"][0]["ipv6"], "");
    assert_eq!(stored["observations"][0]["location"]["unc"], 3.2);
    assert!(stored.get("secret").is_none());
}

#[tokio::test]
async fn test_rejected_batches_still_get_no_content() {
    let app = setup_test_app().await;

    for body in [devices_seen("wrong", "AP1"), "{not json".to_string()] {
        app.client()
            .post("/")
            .text(body)
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    let stats = app.app_state.stats.clone();
    wait_until(|| stats.snapshot().processed() == 2).await;

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.auth_failures, 1);
    assert_eq!(snapshot.decode_failures, 1);
    assert_eq!(snapshot.persisted, 0);
    assert!(!app.bucket_dir().exists() || std::fs::read_dir(app.bucket_dir()).unwrap().count() == 0);
}

#[tokio::test]
async fn test_stats_reports_counters() {
    let app = setup_test_app().await;

    app.client()
        .post("/")
        .text(devices_seen(SECRET, "AP1"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let stats = app.app_state.stats.clone();
    wait_until(|| stats.snapshot().persisted == 1).await;

    let response = app.client().get("/stats").await;
    response.assert_status_ok();

    let data: serde_json::Value = response.json();
    assert_eq!(data["accepted"], 1);
    assert_eq!(data["persisted"], 1);
    assert_eq!(data["rejected"], 0);
}

#[tokio::test]
async fn test_health_reports_queue_and_storage() {
    let app = setup_test_app_with(&[("MAX_QUEUE_SIZE", "7")], None).await;

    let response = app.client().get("/health").await;
    response.assert_status_ok();

    let data: serde_json::Value = response.json();
    assert_eq!(data["status"], "healthy");
    assert_eq!(data["storage"], "healthy");
    assert_eq!(data["backend"], "local");
    assert_eq!(data["queue"]["capacity"], 7);
    assert_eq!(data["workers"], 2);
}

#[tokio::test]
async fn test_health_is_unavailable_when_storage_is_down() {
    let app = setup_test_app_with(&[], Some(Arc::new(UnreachableStorage))).await;

    let response = app.client().get("/health").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let data: serde_json::Value = response.json();
    assert_eq!(data["status"], "unhealthy");
    assert!(data["storage"]
        .as_str()
        .unwrap()
        .starts_with("unhealthy: "));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/healthz")
        .add_header("X-Request-ID", "req-42")
        .await;

    assert_eq!(response.header("X-Request-ID"), "req-42");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = setup_test_app_with(&[("MAX_BODY_SIZE_MB", "1")], None).await;

    let response = app
        .client()
        .post("/")
        .bytes(vec![b'x'; 2 * 1024 * 1024].into())
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.app_state.stats.snapshot().accepted, 0);
}
