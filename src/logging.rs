//! Logging and tracing setup for IAM Core.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "iam_core=info,tower_http=info";

/// Initialize the tracing subscriber with JSON formatting.
///
/// Account creation, sign-ins, rejected credentials (with the internal
/// mismatch reason) and guard rejections are emitted as structured events;
/// `tower_http` adds one span per request. Reads log level from RUST_LOG.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Initialize tracing for tests (human-readable, captured by the test harness).
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("iam_core=debug")
        .try_init();
}
