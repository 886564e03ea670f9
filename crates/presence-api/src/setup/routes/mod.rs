//! Route configuration and setup.
//!
//! The scanning API lives on `/`; probes in [health](health).

mod health;

use crate::handlers::{ingest_scan, not_found, pipeline_stats, validator};
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::get,
    Router,
};
use presence_infra::{get_request_id, request_id_middleware};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    let body_limit = state.config.max_body_size_bytes();

    // Unsupported methods on known paths fall through to the plain 404.
    Router::new()
        .route(
            "/",
            get(validator).post(ingest_scan).fallback(not_found),
        )
        .route("/healthz", get(health::liveness_check).fallback(not_found))
        .route("/health", get(health::health_check).fallback(not_found))
        .route("/stats", get(pipeline_stats).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(axum::middleware::from_fn(request_id_middleware))
}

fn make_request_span(request: &Request) -> tracing::Span {
    let request_id = get_request_id(request).unwrap_or_default();
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id
    )
}
