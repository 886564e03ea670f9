//! Presence Worker Library
//!
//! The asynchronous core of the ingest service: a bounded job queue, the intake
//! gate that feeds it, and the worker pool that decodes, authenticates, stamps and
//! persists each scan batch.

pub mod intake;
pub mod pipeline;
pub mod pool;
pub mod processor;
pub mod queue;
pub mod stats;

pub use intake::IntakeGate;
pub use pipeline::{Pipeline, PipelineConfig};
pub use pool::WorkerPool;
pub use processor::{FailureKind, JobError, JobProcessor, Persisted, ProcessorConfig};
pub use queue::{bounded, JobReceiver, JobSender, RawJob};
pub use stats::{PipelineStats, StatsSnapshot};
