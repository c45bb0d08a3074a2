//! Diagnostic tracing, controlled by `RUST_LOG`.
//!
//! User-facing output goes through `msg`; this is only for debugging a run,
//! e.g. `RUST_LOG=git_streak=debug git-streak --dry-run`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Defaults to `warn` when `RUST_LOG` is unset.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
