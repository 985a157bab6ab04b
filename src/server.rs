use axum::{
    middleware as axum_mw,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Submission / lookup ─────────────────────────────────
        .route("/hash", any(handlers::hash::submit_hash))
        .route("/hash/", any(handlers::hash::lookup_hash))
        .route("/hash/*id", any(handlers::hash::lookup_hash))
        // ── Statistics ──────────────────────────────────────────
        .route("/stats", get(handlers::stats::get_stats))
        // ── Lifecycle ───────────────────────────────────────────
        .route(
            "/shutdown",
            get(handlers::shutdown::shutdown).post(handlers::shutdown::shutdown),
        )
        // ── Provide shared state to all routes above ────────────
        .with_state(state)
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        .layer(CorsLayer::permissive())
}

/// Serve until `/shutdown` is hit or Ctrl-C arrives, then drain
/// in-flight requests. Pending digest tasks are abandoned.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let stop = state.shutdown_signal();
    let app = create_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = stop => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("received Ctrl-C");
                }
            }
        })
        .await
}
