//! Structured logging initialization.
//!
//! Output format comes from `ALGOFI_LOG_FORMAT` (`pretty`, `compact` or
//! `json`). Without it, `RUST_ENV=production` selects JSON and anything else
//! selects pretty output. `RUST_LOG` overrides the default filter.

use crate::error::{TelemetryError, TelemetryResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log format.
pub const LOG_FORMAT_ENV: &str = "ALGOFI_LOG_FORMAT";

/// SDK crates logged at debug by default.
const SDK_TARGETS: &[&str] = &[
    "algofi_core",
    "algofi_txn",
    "algofi_ledger",
    "algofi_lending",
    "algofi_staking",
    "algofi_governance",
    "algofi_assets",
    "algofi_client",
    "algofi_snapshot",
];

/// HTTP stack, kept quiet unless asked for.
const HTTP_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    /// One JSON object per event, fields flattened.
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Format selected by the process environment.
    pub fn from_env() -> Self {
        if let Some(format) = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .as_deref()
            .and_then(Self::parse)
        {
            return format;
        }
        match std::env::var("RUST_ENV").as_deref() {
            Ok("production") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter() -> String {
    let mut directives = vec!["info".to_string()];
    directives.extend(SDK_TARGETS.iter().map(|t| format!("{t}=debug")));
    directives.extend(HTTP_TARGETS.iter().map(|t| format!("{t}=warn")));
    directives.join(",")
}

/// Install the global subscriber in the format the environment selects.
pub fn init_logging() -> TelemetryResult<()> {
    init_logging_with(LogFormat::from_env())
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging_with(format: LogFormat) -> TelemetryResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter())
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?,
    };
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true))
            .try_init(),
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}
