//! Bounded in-memory job queue.
//!
//! A bounded `tokio::sync::mpsc` channel. Producers hold cloned [`JobSender`]s; the
//! single receiver is shared by every worker behind an async mutex, so exactly one
//! worker waits in `recv` at a time and each job is handed to exactly one worker.
//! The queue is never closed while the service runs: the receiving half only goes
//! away when the pool shuts down.

use bytes::Bytes;
use presence_core::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

/// One undecoded request body awaiting processing.
#[derive(Debug, Clone)]
pub struct RawJob {
    body: Bytes,
}

impl RawJob {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Create a queue holding at most `capacity` jobs.
pub fn bounded(capacity: usize) -> (JobSender, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        JobSender { tx },
        JobReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producer handle.
#[derive(Clone)]
pub struct JobSender {
    tx: mpsc::Sender<RawJob>,
}

impl JobSender {
    /// Enqueue `job`, waiting for as long as the queue stays full.
    pub async fn enqueue(&self, job: RawJob) -> Result<(), AppError> {
        self.tx.send(job).await.map_err(|_| AppError::QueueClosed)
    }

    /// Enqueue `job`, waiting at most `timeout` for capacity. The job is dropped on failure.
    pub async fn try_enqueue_for(&self, job: RawJob, timeout: Duration) -> Result<(), AppError> {
        self.tx
            .send_timeout(job, timeout)
            .await
            .map_err(|e| match e {
                mpsc::error::SendTimeoutError::Timeout(_) => AppError::QueueFull {
                    waited_ms: timeout.as_millis() as u64,
                },
                mpsc::error::SendTimeoutError::Closed(_) => AppError::QueueClosed,
            })
    }

    /// Number of jobs currently buffered.
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer handle shared by the worker pool.
#[derive(Clone)]
pub struct JobReceiver {
    rx: Arc<Mutex<mpsc::Receiver<RawJob>>>,
}

impl JobReceiver {
    /// Wait for the next job. `None` once every sender is gone and the buffer is drained.
    pub async fn dequeue(&self) -> Option<RawJob> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }
}
