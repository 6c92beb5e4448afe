use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs a stderr logger filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`]. Calling it again is a no-op.
pub fn setup_logger() {
  setup_logger_with_default(DEFAULT_LOG_FILTER);
}

/// Like [`setup_logger`], with `default` used when `RUST_LOG` is unset or invalid.
pub fn setup_logger_with_default(default: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  let _ = tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(filter)
    .try_init();
}
