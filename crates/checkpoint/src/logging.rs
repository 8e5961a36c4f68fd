//! Log output for checks.
//!
//! The harness emits `tracing` events: a `checkpoint.run` span per check,
//! debug events for composition and capture, and warnings for detached
//! router adapters. Nothing is printed unless a subscriber is installed.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `checkpoint=debug`.
pub const LOG_ENV: &str = "CHECKPOINT_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a human-readable subscriber that writes through the test
/// harness, so output is captured per test.
///
/// Safe to call from every test; only the first call installs anything.
///
/// ```
/// checkpoint::logging::init_test_logging();
/// checkpoint::logging::init_test_logging();
/// ```
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(env = LOG_ENV, "test logging initialized");
    }
}
