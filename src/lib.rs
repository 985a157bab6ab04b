use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

pub mod config;
pub mod digest;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod worker;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Identifier issuance, latency log and digest map.
    pub coordinator: Arc<state::Coordinator>,

    /// Minimum wait before a submission's digest is stored.
    pub hash_delay: Duration,

    /// Flipped to `true` by `/shutdown`; the server watches it.
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub fn new(hash_delay: Duration) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            coordinator: Arc::new(state::Coordinator::new()),
            hash_delay,
            shutdown,
        }
    }

    /// Ask the listener to stop accepting and drain in-flight requests.
    pub fn request_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn shutdown_requested(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Resolves once `request_shutdown` has been called.
    pub fn shutdown_signal(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut rx = self.shutdown.subscribe();
        async move {
            // An Err means the sender is gone, which also ends the server.
            let _ = rx.wait_for(|stop| *stop).await;
        }
    }
}
