//! Worker pool: a fixed number of workers draining the job queue.
//!
//! Each worker processes strictly one job at a time. Worker ids (`1..=N`) are for
//! log correlation only.
//!
//! Shutdown: [`WorkerPool::shutdown`] stops workers between jobs; a job already
//! being processed runs to completion. [`WorkerPool::join`] waits for all of them.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::processor::JobProcessor;
use crate::queue::JobReceiver;
use crate::stats::PipelineStats;

pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl WorkerPool {
    /// Spawn `workers` workers consuming from `receiver`.
    pub fn start(
        workers: usize,
        receiver: JobReceiver,
        processor: Arc<JobProcessor>,
        stats: Arc<PipelineStats>,
    ) -> Self {
        let cancel = CancellationToken::new();

        let handles = (1..=workers.max(1))
            .map(|worker_id| {
                tracing::info!(worker_id, "Starting worker");
                tokio::spawn(Self::run_worker(
                    worker_id,
                    receiver.clone(),
                    processor.clone(),
                    stats.clone(),
                    cancel.clone(),
                ))
            })
            .collect();

        Self { handles, cancel }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Signals every worker to stop after its current job. Returns immediately.
    pub fn shutdown(&self) {
        tracing::info!(workers = self.handles.len(), "Initiating worker pool shutdown");
        self.cancel.cancel();
    }

    /// Wait until every worker has exited.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Worker task panicked");
            }
        }
        tracing::info!("Worker pool stopped");
    }

    async fn run_worker(
        worker_id: usize,
        receiver: JobReceiver,
        processor: Arc<JobProcessor>,
        stats: Arc<PipelineStats>,
        cancel: CancellationToken,
    ) {
        loop {
            let job = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                job = receiver.dequeue() => match job {
                    Some(job) => job,
                    None => break,
                },
            };

            match processor.process(job).await {
                Ok(persisted) => {
                    stats.record_persisted();
                    tracing::info!(
                        worker_id,
                        key = %persisted.key,
                        ap_mac = %persisted.ap_mac,
                        observations = persisted.observations,
                        size_bytes = persisted.size_bytes,
                        duration_ms = persisted.elapsed.as_secs_f64() * 1000.0,
                        "Saved scan batch"
                    );
                }
                Err(e) => {
                    stats.record_failure(&e);
                    if e.is_input_error() {
                        tracing::warn!(
                            worker_id,
                            kind = e.kind().as_str(),
                            error = %e,
                            "Discarding scan payload"
                        );
                    } else {
                        tracing::error!(
                            worker_id,
                            kind = e.kind().as_str(),
                            error = %e,
                            "Failed to persist scan batch, discarding job"
                        );
                    }
                }
            }
        }

        tracing::debug!(worker_id, "Worker exiting");
    }
}
