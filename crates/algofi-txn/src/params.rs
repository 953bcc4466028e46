//! Suggested transaction parameters.

use serde::{Deserialize, Serialize};

/// Number of rounds a transaction stays valid after `first_valid`.
pub const DEFAULT_VALIDITY_WINDOW: u64 = 1000;

/// Parameters every transaction copies from the ledger's current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
    /// Minimum flat fee (base unit fee) in micro-units of the native asset.
    pub min_fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
}

impl SuggestedParams {
    /// Params valid from `last_round` for the default window.
    pub fn from_last_round(
        last_round: u64,
        min_fee: u64,
        genesis_id: impl Into<String>,
        genesis_hash: [u8; 32],
    ) -> Self {
        Self {
            min_fee,
            first_valid: last_round,
            last_valid: last_round + DEFAULT_VALIDITY_WINDOW,
            genesis_id: genesis_id.into(),
            genesis_hash,
        }
    }
}
