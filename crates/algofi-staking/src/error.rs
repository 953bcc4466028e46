//! Staking error types.

use algofi_core::{Address, AppId, DecodeError};
use algofi_ledger::LedgerError;
use algofi_txn::TxnError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StakingError {
    #[error("Staking pool {0} is not loaded")]
    PoolNotLoaded(AppId),

    #[error("Staking pool {0} is not configured")]
    UnknownPool(AppId),

    #[error("Staking pool {app_id} has no {reference} configured")]
    MissingReference {
        app_id: AppId,
        reference: &'static str,
    },

    #[error("Rewards programs of staking pool {0} failed to decode")]
    RewardsProgramsUnavailable(AppId),

    #[error("{address} is not opted into staking pool {app_id}")]
    NotOptedIn { app_id: AppId, address: Address },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transaction error: {0}")]
    Txn(#[from] TxnError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

pub type StakingResult<T> = Result<T, StakingError>;
