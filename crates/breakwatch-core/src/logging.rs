#![forbid(unsafe_code)]

//! Structured logging glue.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here (and at
//! the crate root). With `tracing-json` a host can install a JSON subscriber
//! whose filter comes from [`LOG_ENV`].

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `breakwatch_runtime=trace`.
pub const LOG_ENV: &str = "BREAKWATCH_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};

/// Error returned when a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub struct LoggingInitError {
    message: String,
}

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install log subscriber: {}", self.message)
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {}

/// Install a global JSON `tracing` subscriber filtered by [`LOG_ENV`].
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingInitError {
            message: err.to_string(),
        })
}
