//! Lending error types.

use algofi_core::{AppId, DecodeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LendingError {
    #[error("Market {0} is not loaded")]
    MarketNotLoaded(AppId),

    #[error("Market {0} is not configured")]
    UnknownMarket(AppId),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

pub type LendingResult<T> = Result<T, LendingError>;
