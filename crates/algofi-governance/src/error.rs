//! Governance error types.

use algofi_core::{Address, AppId, DecodeError};
use algofi_ledger::LedgerError;
use algofi_txn::TxnError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("Governance is not configured on this network")]
    NotConfigured,

    #[error("Voting escrow {0} is not loaded")]
    VotingEscrowNotLoaded(AppId),

    #[error("Admin {0} is not loaded")]
    AdminNotLoaded(AppId),

    #[error("Governance config has no {0}")]
    MissingReference(&'static str),

    #[error("Lock duration {duration}s outside [{min}, {max}]")]
    LockDurationOutOfRange { duration: u64, min: u64, max: u64 },

    #[error("{address} is not opted into {app_id}")]
    NotOptedIn { app_id: AppId, address: Address },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transaction error: {0}")]
    Txn(#[from] TxnError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

pub type GovernanceResult<T> = Result<T, GovernanceError>;
