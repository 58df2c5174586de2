use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter for the service: `RUST_LOG` wins, otherwise the
/// configured level (normally `AppConfig::log_level`).
pub fn env_filter(configured_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global fmt subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_tracing(configured_level: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(configured_level))
        .with_target(true)
        .try_init();
}
