//! Telemetry error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed or the filter is invalid.
    #[error("Cannot install log subscriber: {0}")]
    LoggingInit(String),

    #[error("Cannot render metrics: {0}")]
    Metrics(String),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
