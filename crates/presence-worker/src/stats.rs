//! Pipeline counters.
//!
//! The HTTP caller never learns what happened to an accepted batch, so every
//! outcome is counted here for operators instead.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::processor::{FailureKind, JobError};

#[derive(Debug, Default)]
pub struct PipelineStats {
    accepted: AtomicU64,
    rejected: AtomicU64,
    pending_enqueues: AtomicU64,
    persisted: AtomicU64,
    decode_failures: AtomicU64,
    auth_failures: AtomicU64,
    serialize_failures: AtomicU64,
    storage_failures: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub accepted: u64,
    pub rejected: u64,
    /// Detached enqueue tasks still waiting for queue capacity.
    pub pending_enqueues: u64,
    pub persisted: u64,
    pub decode_failures: u64,
    pub auth_failures: u64,
    pub serialize_failures: u64,
    pub storage_failures: u64,
}

impl StatsSnapshot {
    /// Jobs that reached a worker and finished, successfully or not.
    pub fn processed(&self) -> u64 {
        self.persisted
            + self.decode_failures
            + self.auth_failures
            + self.serialize_failures
            + self.storage_failures
    }
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn enqueue_started(&self) {
        self.pending_enqueues.fetch_add(1, Ordering::Relaxed);
    }

    pub fn enqueue_finished(&self) {
        self.pending_enqueues.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn record_persisted(&self) {
        self.persisted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, error: &JobError) {
        let counter = match error.kind() {
            FailureKind::Decode => &self.decode_failures,
            FailureKind::Auth => &self.auth_failures,
            FailureKind::Serialize => &self.serialize_failures,
            FailureKind::Storage => &self.storage_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            pending_enqueues: self.pending_enqueues.load(Ordering::Relaxed),
            persisted: self.persisted.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            auth_failures: self.auth_failures.load(Ordering::Relaxed),
            serialize_failures: self.serialize_failures.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
        }
    }
}
