//! Test helpers: a recording storage double and pipeline builders.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::TimeZone;
use presence_core::constants::TENANT;
use presence_core::{FixedClock, IntakePolicy, StorageBackend};
use presence_storage::{Storage, StorageError, StorageResult};
use presence_worker::{Pipeline, PipelineConfig, ProcessorConfig};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

pub const SECRET: &str = "S";
pub const BUCKET: &str = "scans";

/// One recorded `put_object` call.
#[derive(Debug, Clone)]
pub struct PutCall {
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
}

impl PutCall {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("stored body is JSON")
    }
}

/// Storage double that records every put. When built with [`RecordingStorage::gated`]
/// each put waits for a permit, so tests can hold calls open until released.
#[derive(Default)]
pub struct RecordingStorage {
    calls: Mutex<Vec<PutCall>>,
    started: AtomicUsize,
    gate: Option<Semaphore>,
    fail: bool,
}

impl RecordingStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            gate: Some(Semaphore::new(0)),
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    /// Let `n` held (or future) puts complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<PutCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> StorageResult<()> {
        self.started.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| StorageError::BackendError(e.to_string()))?
                .forget();
        }

        if self.fail {
            return Err(StorageError::UploadFailed("503 Slow Down".to_string()));
        }

        self.calls.lock().unwrap().push(PutCall {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: data,
        });
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

pub fn pipeline_config(queue_capacity: usize, workers: usize, policy: IntakePolicy) -> PipelineConfig {
    PipelineConfig {
        queue_capacity,
        workers,
        intake_policy: policy,
        processor: ProcessorConfig {
            secret: SECRET.to_string(),
            bucket: BUCKET.to_string(),
            time_zone: chrono_tz::Tz::UTC,
            tenant: TENANT.to_string(),
        },
    }
}

/// Start a pipeline whose clock is pinned to 2024-01-01T00:00:00Z.
pub fn start_pipeline(config: PipelineConfig, storage: Arc<RecordingStorage>) -> Pipeline {
    let clock = FixedClock(chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    Pipeline::start(config, storage, Arc::new(clock))
}

/// A valid DevicesSeen payload for access point `ap_mac`.
pub fn devices_seen(secret: &str, ap_mac: &str) -> String {
    serde_json::json!({
        "type": "DevicesSeen",
        "secret": secret,
        "version": "2.0",
        "data": {
            "apMac": ap_mac,
            "apFloors": [],
            "apTags": [],
            "observations": [
                {"ssid": "net", "clientMac": "C1", "rssi": -60, "location": {}}
            ],
            "tenant": "untrusted"
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

/// Give spawned tasks a chance to run, then assert `condition` still holds.
pub async fn stays_true<F, Fut>(condition: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..10 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(condition().await, "condition stopped holding");
    }
}
