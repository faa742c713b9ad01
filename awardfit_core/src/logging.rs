//! Logging infrastructure for AwardFit.
//!
//! Centralized tracing setup for the CLI binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with sensible defaults.
///
/// Compact format, filtered at INFO unless overridden with RUST_LOG.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level.
///
/// `default_level` can still be overridden by the RUST_LOG environment
/// variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
