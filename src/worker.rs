use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::digest::digest;
use crate::state::{Coordinator, RequestId};

// ─── Public entry point ──────────────────────────────────────────

/// Spawns the delayed digest computation for one accepted submission.
///
/// The task sleeps for at least `delay` without touching the coordinator,
/// then hashes `secret` and stores the result under `id`. Nobody waits on
/// the returned handle in the server; it exists for tests.
pub fn spawn_completion(
    coordinator: Arc<Coordinator>,
    id: RequestId,
    secret: String,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        complete(&coordinator, id, secret.as_bytes());
    })
}

fn complete(coordinator: &Coordinator, id: RequestId, secret: &[u8]) {
    match coordinator.store_digest(id, digest(secret)) {
        Ok(()) => tracing::info!(id, "digest available"),
        Err(e) => tracing::error!(id, error = %e, "failed to store digest"),
    }
}
