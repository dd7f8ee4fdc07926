//! Structured telemetry initialisation for the plugin process.
//!
//! Stdout carries the protocol response, so all telemetry goes to
//! stderr. The filter is read from the `PRUNER_LOG` environment
//! variable and defaults to `info`.

use std::io::{self, IsTerminal};

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Environment variable holding the log filter expression.
pub const LOG_FILTER_ENV: &str = "PRUNER_LOG";

const DEFAULT_FILTER: &str = "info";

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber.
///
/// The plugin is a one-shot process, so this is called exactly once at
/// startup; a second call fails with [`TelemetryError::Subscriber`].
///
/// # Errors
///
/// Returns an error if the filter expression does not parse or the
/// subscriber cannot be installed.
pub fn initialise() -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        // Avoid stray colour codes in non-TTY sinks while keeping colour
        // on interactive terminals.
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}
