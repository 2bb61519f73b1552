use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber, writing to stderr so command output on
/// stdout stays machine readable. `RUST_LOG` overrides the default filter.
/// A second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,holdem_engine=info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .try_init();
}
