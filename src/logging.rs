//! Logging setup for `xtask` binaries.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` takes precedence over
/// `verbose`. Calling this more than once keeps the first
/// subscriber.
pub fn init(verbose: bool) {
    let default = if verbose { "decolar=debug" } else { "decolar=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
