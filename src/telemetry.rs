//! Logging initialization.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Install a console subscriber filtered by `RUST_LOG` (default `info`).
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false));

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
