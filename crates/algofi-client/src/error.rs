//! Client error types.

use crate::stages::LoadStage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Stage {stage} started before {missing:?} settled")]
    StageOrder {
        stage: LoadStage,
        missing: Vec<LoadStage>,
    },

    #[error("Ledger error: {0}")]
    Ledger(#[from] algofi_ledger::LedgerError),

    #[error("Lending error: {0}")]
    Lending(#[from] algofi_lending::LendingError),

    #[error("Staking error: {0}")]
    Staking(#[from] algofi_staking::StakingError),

    #[error("Governance error: {0}")]
    Governance(#[from] algofi_governance::GovernanceError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] algofi_telemetry::TelemetryError),
}

pub type ClientResult<T> = Result<T, ClientError>;
