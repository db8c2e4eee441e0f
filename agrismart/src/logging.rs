use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging to stdout.
///
/// `RUST_LOG` takes precedence; otherwise `default` (e.g. `"info"`) is used
/// as the filter directive.
pub fn init_logging(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_target(false).init();
}
