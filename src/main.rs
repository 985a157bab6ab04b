use std::sync::Arc;

use anyhow::Context;
use hash_server::{config::Config, server, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    // ── 1. Resolve port / delay ──────────────────────────────────
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    // ── 2. Build shared state ────────────────────────────────────
    let state = Arc::new(AppState::new(config.hash_delay));

    // ── 3. Bind & serve ──────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        delay_secs = config.hash_delay.as_secs(),
        "listening"
    );

    server::serve(listener, state.clone())
        .await
        .context("server exited with error")?;

    let stats = state.coordinator.statistics();
    if stats.has_data() {
        tracing::info!(
            total = stats.total,
            average_us = stats.average,
            completed = state.coordinator.completed(),
            "shutdown complete"
        );
    } else {
        tracing::info!("shutdown complete, no submissions served");
    }
    Ok(())
}
