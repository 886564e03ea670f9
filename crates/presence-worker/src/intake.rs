//! Intake gate: the hand-off between the transport layer and the job queue.
//!
//! Acceptance means "queued for asynchronous handling", never "processed". Under
//! [`IntakePolicy::Detached`] the enqueue runs on a detached task, so a saturated
//! queue parks those tasks instead of the request path and the caller is still
//! told the batch was accepted. [`IntakePolicy::Bounded`] waits a bounded time for
//! capacity and rejects the request when none frees up.

use bytes::Bytes;
use presence_core::{AppError, IntakePolicy};
use std::sync::Arc;

use crate::queue::{JobSender, RawJob};
use crate::stats::PipelineStats;

#[derive(Clone)]
pub struct IntakeGate {
    sender: JobSender,
    policy: IntakePolicy,
    stats: Arc<PipelineStats>,
}

impl IntakeGate {
    pub fn new(sender: JobSender, policy: IntakePolicy, stats: Arc<PipelineStats>) -> Self {
        Self {
            sender,
            policy,
            stats,
        }
    }

    /// Hand `body` to the pipeline. `Ok(())` means accepted.
    #[tracing::instrument(skip(self, body), fields(size_bytes = body.len()))]
    pub async fn accept(&self, body: Bytes) -> Result<(), AppError> {
        let job = RawJob::new(body);

        match self.policy {
            IntakePolicy::Detached => {
                self.stats.record_accepted();
                self.stats.enqueue_started();

                let sender = self.sender.clone();
                let stats = self.stats.clone();
                tokio::spawn(async move {
                    if let Err(e) = sender.enqueue(job).await {
                        stats.record_rejected();
                        tracing::error!(error = %e, "Dropping accepted job, queue is gone");
                    }
                    stats.enqueue_finished();
                });

                Ok(())
            }
            IntakePolicy::Bounded { timeout } => {
                match self.sender.try_enqueue_for(job, timeout).await {
                    Ok(()) => {
                        self.stats.record_accepted();
                        Ok(())
                    }
                    Err(e) => {
                        self.stats.record_rejected();
                        tracing::warn!(
                            error = %e,
                            queue_len = self.sender.len(),
                            "Rejecting scan payload"
                        );
                        Err(e)
                    }
                }
            }
        }
    }

    /// Jobs currently buffered in the queue.
    pub fn queue_len(&self) -> usize {
        self.sender.len()
    }

    pub fn queue_capacity(&self) -> usize {
        self.sender.capacity()
    }

    pub fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }
}
