//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded `Config` to a router and a running
//! worker pool.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use presence_core::{Clock, Config, SystemClock};
use presence_storage::Storage;
use presence_worker::{Pipeline, PipelineConfig, WorkerPool};
use std::sync::Arc;

/// A fully wired application.
pub struct App {
    pub state: Arc<AppState>,
    pub router: axum::Router,
    pub pool: WorkerPool,
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<App> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    presence_infra::init_telemetry(config.log_format(), config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        port = config.server_port(),
        time_zone = %config.time_zone(),
        backend = %config.storage_backend(),
        bucket = config.s3_bucket(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    Ok(build_app(config, storage, Arc::new(SystemClock)))
}

/// Start the pipeline on `storage` and build the router around it.
///
/// Must be called from within a tokio runtime.
pub fn build_app(config: Config, storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> App {
    let pipeline = Pipeline::start(PipelineConfig::from_config(&config), storage.clone(), clock);

    let state = Arc::new(AppState {
        config,
        gate: pipeline.gate,
        stats: pipeline.stats,
        storage,
    });
    let router = routes::setup_routes(state.clone());

    App {
        state,
        router,
        pool: pipeline.pool,
    }
}
