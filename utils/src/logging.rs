//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

fn env_filter(default_directive: &str) -> EnvFilter {
    // RUST_LOG wins over the configured level when set.
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize the tracing subscriber with human-readable output.
///
/// `default_directive` is a filter like "info" or "aurum_engine=debug";
/// the `RUST_LOG` environment variable overrides it. Safe to call more
/// than once; later calls are no-ops.
pub fn init_tracing(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .try_init()
        .ok();
}

/// Initialize the tracing subscriber emitting JSON lines.
///
/// Used when log output is shipped to an aggregator rather than a terminal.
pub fn init_tracing_json(default_directive: &str) {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(default_directive))
        .try_init()
        .ok();
}
