//! Wires queue, intake gate and worker pool together.

use presence_core::{Clock, Config, IntakePolicy};
use presence_storage::Storage;
use std::sync::Arc;

use crate::intake::IntakeGate;
use crate::pool::WorkerPool;
use crate::processor::{JobProcessor, ProcessorConfig};
use crate::queue;
use crate::stats::PipelineStats;

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub queue_capacity: usize,
    pub workers: usize,
    pub intake_policy: IntakePolicy,
    pub processor: ProcessorConfig,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            queue_capacity: config.max_queue_size(),
            workers: config.max_workers(),
            intake_policy: config.intake_policy(),
            processor: ProcessorConfig::from_config(config),
        }
    }
}

/// A running pipeline. Dropping the gate does not stop the workers; call
/// `pool.shutdown()` for that.
pub struct Pipeline {
    pub gate: IntakeGate,
    pub pool: WorkerPool,
    pub stats: Arc<PipelineStats>,
}

impl Pipeline {
    /// Must be called from within a tokio runtime.
    pub fn start(config: PipelineConfig, storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        let (sender, receiver) = queue::bounded(config.queue_capacity);
        let stats = Arc::new(PipelineStats::new());

        let processor = Arc::new(JobProcessor::new(config.processor, storage, clock));
        let pool = WorkerPool::start(config.workers, receiver, processor, stats.clone());
        let gate = IntakeGate::new(sender, config.intake_policy, stats.clone());

        tracing::info!(
            queue_capacity = gate.queue_capacity(),
            workers = pool.size(),
            intake_policy = ?config.intake_policy,
            "Ingest pipeline started"
        );

        Self { gate, pool, stats }
    }
}
