use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::AppState;

use super::AppError;

// ─── GET /stats ──────────────────────────────────────────────────
/// Total accepted submissions and their mean latency (μs) as JSON.

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let stats = state.coordinator.statistics();

    let body = serde_json::to_string(&stats).map_err(|e| {
        tracing::error!(error = %e, "failed to encode statistics");
        AppError::Stats
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
