//! Tracing setup for the test suite.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with an env-driven filter.
///
/// Reads `RUST_LOG` when set, defaults to `info`. Safe to call multiple
/// times; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
