//! Prometheus metrics for the Algofi SDK.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. A registration
//! failure means duplicate metric names, a programming error that should
//! crash on first use. These panics only occur during static
//! initialization.

use crate::error::{TelemetryError, TelemetryResult};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_counter, CounterVec, Encoder,
    HistogramVec, IntCounter, TextEncoder,
};

/// Program state loads.
/// Labels: product (lending/staking/governance), outcome (ok/error)
pub static PROGRAM_LOADS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "algofi_program_loads_total",
        "Total program state loads",
        &["product", "outcome"]
    )
    .unwrap()
});

/// Load stage duration in milliseconds.
pub static LOAD_DURATION_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "algofi_load_duration_ms",
        "Load stage duration in milliseconds",
        &["stage"],
        vec![5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0]
    )
    .unwrap()
});

/// USD conversions for assets without a positive price.
pub static PRICE_LOOKUP_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "algofi_price_lookup_failures_total",
        "USD conversions for unknown or unpriced assets"
    )
    .unwrap()
});

/// Market-derived prices dropped because the valuation did not fit a decimal.
pub static PRICE_DERIVATION_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "algofi_price_derivation_failures_total",
        "b-asset prices skipped on valuation overflow"
    )
    .unwrap()
});

/// External price feed fetch failures.
pub static PRICE_FEED_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "algofi_price_feed_failures_total",
        "External price feed fetch failures"
    )
    .unwrap()
});

/// Transaction groups built.
/// Labels: action, shape (empty/single/grouped)
pub static TXN_GROUPS_BUILT_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "algofi_txn_groups_built_total",
        "Transaction groups built per action and shape",
        &["action", "shape"]
    )
    .unwrap()
});

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record a program load attempt.
    pub fn program_loaded(product: &str, ok: bool) {
        let outcome = if ok { "ok" } else { "error" };
        PROGRAM_LOADS_TOTAL
            .with_label_values(&[product, outcome])
            .inc();
    }

    /// Record a load stage duration.
    pub fn load_duration(stage: &str, duration_ms: f64) {
        LOAD_DURATION_MS
            .with_label_values(&[stage])
            .observe(duration_ms);
    }

    pub fn price_lookup_failed() {
        PRICE_LOOKUP_FAILURES_TOTAL.inc();
    }

    pub fn price_derivation_failed() {
        PRICE_DERIVATION_FAILURES_TOTAL.inc();
    }

    pub fn price_feed_failed() {
        PRICE_FEED_FAILURES_TOTAL.inc();
    }

    /// Record a built transaction group.
    pub fn txn_group_built(action: &str, shape: &str) {
        TXN_GROUPS_BUILT_TOTAL
            .with_label_values(&[action, shape])
            .inc();
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn gather_text() -> TelemetryResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&prometheus::gather(), &mut buffer)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
