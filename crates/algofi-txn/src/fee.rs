//! Fee overrides.
//!
//! Program calls that issue inner transactions must prepay those inner
//! transactions' fees. The multiple is a static property of each action.

use crate::params::SuggestedParams;

/// Ledger minimum fee per transaction.
pub const MIN_TXN_FEE: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePolicy {
    /// The base unit fee.
    Base,
    /// `n` times the base unit fee (covers `n - 1` inner transactions).
    Multiple(u64),
}

impl FeePolicy {
    /// Flat fee for one transaction under these params.
    pub fn fee(&self, params: &SuggestedParams) -> u64 {
        let base = params.min_fee.max(MIN_TXN_FEE);
        match self {
            Self::Base => base,
            Self::Multiple(n) => base.saturating_mul(*n),
        }
    }
}
