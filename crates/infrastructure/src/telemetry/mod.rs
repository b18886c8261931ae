//! Logging initialization
//!
//! Installs a `tracing` subscriber with an `EnvFilter` and a `fmt` layer in
//! text or JSON form. `RUST_LOG` wins over the configured filter.

use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

use crate::config::{LogFormat, ServerConfig};

/// Filter from `RUST_LOG`, else `fallback`, else plain `info`
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_logging(format: LogFormat, filter: &str) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(filter));
    match format {
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    }
}

/// Install the global subscriber described by the server configuration
pub fn init_from_config(server: &ServerConfig) -> Result<(), TryInitError> {
    init_logging(server.log_format, &server.log_filter)
}
