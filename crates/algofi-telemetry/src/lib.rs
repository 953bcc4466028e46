//! Prometheus metrics and structured logging for the Algofi SDK.
//!
//! - Structured logging with tracing, format chosen from the environment
//! - Prometheus counters for program loads, price lookups and built
//!   transaction groups

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, init_logging_with, LogFormat};
pub use metrics::Metrics;
