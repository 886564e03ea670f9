//! Test helpers: build the application around a test storage backend.
//!
//! Run from workspace root: `cargo test -p presence-api`.

pub mod storage;

use axum_test::TestServer;
use chrono::TimeZone;
use presence_api::setup::{build_app, App};
use presence_core::{Config, FixedClock, IngestConfig};
use presence_storage::{LocalStorage, Storage};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const SECRET: &str = "s3cr3t";
pub const VALIDATOR: &str = "0123456789abcdef";
pub const BUCKET: &str = "scans";

/// Test application: server plus the resources it owns.
pub struct TestApp {
    pub server: TestServer,
    pub app_state: Arc<presence_api::state::AppState>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Directory the local backend writes `BUCKET` objects into.
    pub fn bucket_dir(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(BUCKET)
    }
}

pub fn test_config(temp_dir: &TempDir, overrides: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = [
        ("SCANNER_SECRET", SECRET),
        ("SCANNER_VALIDATOR", VALIDATOR),
        ("S3_BUCKET", BUCKET),
        ("STORAGE_BACKEND", "local"),
        ("MAX_WORKERS", "2"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    map.insert(
        "LOCAL_STORAGE_PATH".to_string(),
        temp_dir.path().display().to_string(),
    );
    for (k, v) in overrides {
        map.insert(k.to_string(), v.to_string());
    }

    let config = IngestConfig::from_source(|key| map.get(key).cloned()).expect("valid test config");
    config.validate().expect("test config passes validation");
    Config(Box::new(config))
}

/// Setup test app backed by local storage in a temp directory.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[], None).await
}

/// Setup test app with config overrides and, optionally, a custom storage backend.
pub async fn setup_test_app_with(
    overrides: &[(&str, &str)],
    storage: Option<Arc<dyn Storage>>,
) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&temp_dir, overrides);

    let storage = match storage {
        Some(storage) => storage,
        None => Arc::new(
            LocalStorage::new(temp_dir.path())
                .await
                .expect("Failed to create local storage"),
        ),
    };

    let clock = FixedClock(chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let App { state, router, .. } = build_app(config, storage, Arc::new(clock));

    let server =
        TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        app_state: state,
        temp_dir,
    }
}

pub fn devices_seen(secret: &str, ap_mac: &str) -> String {
    serde_json::json!({
        "type": "DevicesSeen",
        "secret": secret,
        "version": "2.0",
        "data": {
            "apMac": ap_mac,
            "apFloors": ["Floor 1"],
            "apTags": ["lobby"],
            "observations": [
                {
                    "ssid": "guest",
                    "ipv4": "/10.0.0.12",
                    "ipv6": null,
                    "seenEpoch": 1704067200.5,
                    "seenTime": "2024-01-01T00:00:00Z",
                    "rssi": -58,
                    "manufacturer": "Apple",
                    "os": "iOS",
                    "location": {"lat": 48.85, "lng": 2.35, "unc": 3.2, "x": [1.0], "y": [2.0]},
                    "clientMac": "11:22:33:44:55:66"
                }
            ],
            "tenant": "someone-else"
        }
    })
    .to_string()
}

/// Poll `condition` until it holds, panicking after two seconds.
pub async fn wait_until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
