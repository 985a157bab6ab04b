use axum::extract::State;
use std::sync::Arc;

use crate::AppState;

// ─── GET|POST /shutdown ──────────────────────────────────────────
/// Replies first, then lets the server drain and exit.

pub async fn shutdown(State(state): State<Arc<AppState>>) -> &'static str {
    tracing::info!("shutdown requested");
    state.request_shutdown();
    "Shutdown Complete"
}
