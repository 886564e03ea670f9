//! Per-job processing: decode → authenticate → transform → key → serialize → persist.
//!
//! Every failure is returned as a [`JobError`]. None of them reach the HTTP caller,
//! which was answered before the job was dequeued, and none abort the process: the
//! worker logs the error, counts it and moves on to the next job.

use bytes::Bytes;
use chrono_tz::Tz;
use presence_core::constants::TENANT;
use presence_core::{Clock, Config, ScanEnvelope};
use presence_storage::{storage_key, Storage, StorageError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::queue::RawJob;

/// Read-only settings a worker needs for every job.
#[derive(Clone, Debug)]
pub struct ProcessorConfig {
    pub secret: String,
    pub bucket: String,
    pub time_zone: Tz,
    pub tenant: String,
}

impl ProcessorConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secret: config.secret().to_string(),
            bucket: config.s3_bucket().to_string(),
            time_zone: config.time_zone(),
            tenant: TENANT.to_string(),
        }
    }
}

/// Coarse failure category, used for counters and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Decode,
    Auth,
    Serialize,
    Storage,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Decode => "decode",
            FailureKind::Auth => "auth",
            FailureKind::Serialize => "serialize",
            FailureKind::Storage => "storage",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("can't decode body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid secret")]
    Unauthorized,

    #[error("can't encode observation set: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to store {key}: {source}")]
    Storage {
        key: String,
        #[source]
        source: StorageError,
    },
}

impl JobError {
    pub fn kind(&self) -> FailureKind {
        match self {
            JobError::Decode(_) => FailureKind::Decode,
            JobError::Unauthorized => FailureKind::Auth,
            JobError::Serialize(_) => FailureKind::Serialize,
            JobError::Storage { .. } => FailureKind::Storage,
        }
    }

    /// Rejected input is expected traffic; failing to persist valid input is not.
    pub fn is_input_error(&self) -> bool {
        matches!(self.kind(), FailureKind::Decode | FailureKind::Auth)
    }
}

/// Result of a successfully persisted job.
#[derive(Debug, Clone)]
pub struct Persisted {
    pub key: String,
    pub ap_mac: String,
    pub observations: usize,
    pub size_bytes: usize,
    /// Time spent deriving the key, serializing and uploading.
    pub elapsed: Duration,
}

pub struct JobProcessor {
    config: ProcessorConfig,
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl JobProcessor {
    pub fn new(config: ProcessorConfig, storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            storage,
            clock,
        }
    }

    pub async fn process(&self, job: RawJob) -> Result<Persisted, JobError> {
        let envelope = ScanEnvelope::from_slice(job.body()).map_err(JobError::Decode)?;

        if envelope.secret != self.config.secret {
            return Err(JobError::Unauthorized);
        }

        let start = Instant::now();
        let mut data = envelope.payload;
        data.stamp_tenant(&self.config.tenant);

        let key = storage_key(self.clock.now(), self.config.time_zone, &data.ap_mac);
        let body = serde_json::to_vec(&data).map_err(JobError::Serialize)?;
        let size_bytes = body.len();

        self.storage
            .put_object(&self.config.bucket, &key, Bytes::from(body))
            .await
            .map_err(|source| JobError::Storage {
                key: key.clone(),
                source,
            })?;

        Ok(Persisted {
            key,
            ap_mac: data.ap_mac,
            observations: data.observations.len(),
            size_bytes,
            elapsed: start.elapsed(),
        })
    }
}
