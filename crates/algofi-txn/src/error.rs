//! Transaction error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxnError {
    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("Group of {0} transactions exceeds the ledger limit of {1}")]
    GroupTooLarge(usize, usize),

    #[error("Cannot group an empty transaction list")]
    EmptyGroup,
}

pub type TxnResult<T> = Result<T, TxnError>;
