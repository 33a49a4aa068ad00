//! Tracing setup driven by the `[logging]` section of the config.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingConfig;

/// Filter directives for the subscriber: a non-empty `RUST_LOG` wins over
/// `logging.level`.
pub fn filter_directives(cfg: &LoggingConfig, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => cfg.level.to_ascii_lowercase(),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(cfg: &LoggingConfig) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = filter_directives(cfg, rust_log.as_deref());
    // malformed RUST_LOG falls back to logging.level
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
