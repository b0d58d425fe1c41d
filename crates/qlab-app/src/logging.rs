//! Logging setup.
//!
//! Builds a `tracing-subscriber` stack from [`LoggingConfig`] and hands it
//! back as a [`Telemetry`] handle. Nothing here installs a global
//! subscriber; the handle is passed to the components that log.

use tracing_subscriber::EnvFilter;

use qlab_hal::Telemetry;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{AppError, AppResult};

/// Build the filter for `level`, falling back to `RUST_LOG` when the
/// configured directive is empty.
pub fn env_filter(level: &str) -> AppResult<EnvFilter> {
    if level.trim().is_empty() {
        return Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));
    }
    EnvFilter::try_new(level)
        .map_err(|e| AppError::Config(format!("Invalid log filter {level:?}: {e}")))
}

/// Build a telemetry handle writing to stderr.
pub fn build_telemetry(config: &LoggingConfig) -> AppResult<Telemetry> {
    let filter = env_filter(&config.level)?;
    let telemetry = match config.format {
        LogFormat::Console => Telemetry::from_subscriber(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .finish(),
        ),
        LogFormat::Json => Telemetry::from_subscriber(
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .with_writer(std::io::stderr)
                .finish(),
        ),
    };
    Ok(telemetry)
}
