//! Logging setup.
//!
//! Output goes to stderr and only when asked for, since stdout belongs to the
//! full-screen view or to pipe consumers.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber when `enabled`. `RUST_LOG` overrides the
/// default `info` filter. Calling this twice is harmless.
pub fn init_logging(enabled: bool) {
    if !enabled {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    if installed.is_ok() {
        tracing::info!("Logging initialized");
    }
}
