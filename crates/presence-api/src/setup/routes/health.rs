//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct QueueStatus {
    pub len: usize,
    pub capacity: usize,
    pub pending_enqueues: u64,
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
    pub backend: String,
    pub queue: QueueStatus,
    pub workers: usize,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Full health check: storage reachability plus queue occupancy.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage = state.storage.clone();
    let storage_status = run_check(
        TIMEOUT,
        async move { storage.health_check().await },
        "unhealthy",
    )
    .await;

    let healthy = storage_status == "healthy";
    if !healthy {
        tracing::error!(storage = %storage_status, "Storage health check failed");
    }

    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        storage: storage_status,
        backend: state.storage.backend_type().to_string(),
        queue: QueueStatus {
            len: state.gate.queue_len(),
            capacity: state.gate.queue_capacity(),
            pending_enqueues: state.stats.snapshot().pending_enqueues,
        },
        workers: state.config.max_workers(),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
