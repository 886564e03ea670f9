use presence_core::Config;
use presence_storage::Storage;
use presence_worker::{IntakeGate, PipelineStats};
use std::sync::Arc;

/// Shared handler state. Everything in here is read-only or internally synchronized.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gate: IntakeGate,
    pub stats: Arc<PipelineStats>,
    pub storage: Arc<dyn Storage>,
}
