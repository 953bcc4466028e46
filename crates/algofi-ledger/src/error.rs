//! Ledger error types.

use algofi_core::AddressError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Price feed unavailable: {0}")]
    PriceFeedUnavailable(String),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
