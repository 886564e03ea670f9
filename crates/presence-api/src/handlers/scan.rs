//! Scanning API endpoints: the validator handshake and batch intake.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

const TEXT_PLAIN: &str = "text/plain; charset=utf8";

/// `GET /`: echo the configured validator so the controller accepts this endpoint.
pub async fn validator(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        state.config.validator().to_string(),
    )
}

/// `POST /`: accept a scan batch for asynchronous processing.
///
/// The body is not inspected here. A 204 means the batch was handed to the
/// pipeline, not that it was valid or stored.
pub async fn ingest_scan(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, HttpAppError> {
    state.gate.accept(body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        "404 - Not Found",
    )
}
