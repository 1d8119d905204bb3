use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install the global fmt subscriber. RUST_LOG wins over the configured filter.
pub fn init(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.default_filter));

    // Logs go to stderr so --json output stays parseable; a second init is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
