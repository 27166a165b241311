//! Development-time tracing for debugging the workflow.
//!
//! Diagnostics go to stderr under `RUST_LOG` control and are separate from
//! the progress text the operator sees on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset. Output: stderr, compact
/// format.
///
/// # Example
/// ```bash
/// RUST_LOG=weekly=debug cargo run
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
