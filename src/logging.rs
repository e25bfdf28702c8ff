use std::io;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the stderr subscriber.
///
/// `--verbose` forces `debug`; otherwise RUST_LOG wins over the level from
/// settings.json, which wins over `info`.
pub fn init(verbose: bool, configured: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            configured
                .and_then(|level| EnvFilter::try_new(level).ok())
                .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
        })
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
