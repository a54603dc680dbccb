use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber
///
/// `RUST_LOG` takes precedence; otherwise warnings only, or debug output when `verbose`.
/// Safe to call more than once (later calls are no-ops).
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "rimcomplete=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
