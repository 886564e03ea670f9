use crate::state::AppState;
use axum::{extract::State, Json};
use presence_worker::StatsSnapshot;
use std::sync::Arc;

/// `GET /stats`: pipeline counters since startup.
pub async fn pipeline_stats(State(state): State<Arc<AppState>>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}
