//! usage-widget: an always-on-top desktop meter for a weekly usage limit.
//!
//! Run with:  `RUST_LOG=info usage-widget`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("usage-widget v{} starting", env!("CARGO_PKG_VERSION"));

    usage_window::run().map_err(Into::into)
}
