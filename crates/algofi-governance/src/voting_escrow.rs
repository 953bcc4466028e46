//! Voting escrow: governance token locks.

use crate::config::GovernanceConfig;
use crate::error::{GovernanceError, GovernanceResult};
use crate::keys::voting_escrow as keys;
use algofi_core::{
    Address, AppId, AssetId, DecodeResult, FieldSpec, RawState, Record, Schema, StateRecord,
};
use algofi_telemetry::Metrics;
use algofi_txn::{method_args, AppCall, BuiltTxns, FeePolicy, SuggestedParams, Transaction};

const ESCROW_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("total_locked", keys::TOTAL_LOCKED),
    FieldSpec::uint("total_vebank", keys::TOTAL_VEBANK),
    FieldSpec::uint("asset_id", keys::ASSET_ID),
];

/// Global state schema of the voting escrow.
pub const VOTING_ESCROW_SCHEMA: Schema = Schema::new("voting_escrow", ESCROW_FIELDS);

#[derive(Debug, Clone, PartialEq, Eq)]
struct EscrowState {
    total_locked: u64,
    total_vebank: u64,
    asset_id: AssetId,
}

impl StateRecord for EscrowState {
    const SCHEMA: &'static Schema = &VOTING_ESCROW_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            total_locked: record.uint("total_locked")?,
            total_vebank: record.uint("total_vebank")?,
            asset_id: AssetId::new(record.uint("asset_id")?),
        })
    }
}

/// A loaded voting escrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotingEscrow {
    pub app_id: AppId,
    pub address: Address,
    pub total_locked: u64,
    pub total_vebank: u64,
    /// Asset the escrow reports as locked.
    pub asset_id: AssetId,
    config: GovernanceConfig,
}

impl VotingEscrow {
    pub fn from_state(config: &GovernanceConfig, raw: &RawState) -> DecodeResult<Self> {
        let state = EscrowState::decode_state(raw)?;
        let app_id = config.voting_escrow_app_id;
        Ok(Self {
            app_id,
            address: Address::for_application(app_id),
            total_locked: state.total_locked,
            total_vebank: state.total_vebank,
            asset_id: state.asset_id,
            config: config.clone(),
        })
    }

    fn governance_token(&self) -> GovernanceResult<AssetId> {
        let token = self.config.governance_token;
        if token.get() == 0 {
            return Err(GovernanceError::MissingReference("governance token"));
        }
        Ok(token)
    }

    fn call(&self, sender: Address, call: AppCall, params: &SuggestedParams) -> Transaction {
        Transaction::app_call(sender, call, FeePolicy::Base, params)
    }

    /// Lock `amount` governance tokens: transfer into the escrow, then `lock`.
    pub fn lock_txns(
        &self,
        sender: Address,
        amount: u64,
        params: &SuggestedParams,
    ) -> GovernanceResult<BuiltTxns> {
        let transfer = Transaction::asset_transfer(
            sender,
            self.address,
            self.governance_token()?,
            amount,
            params,
        );
        let lock = self.call(
            sender,
            AppCall::no_op(self.app_id, method_args(keys::LOCK, &[amount])),
            params,
        );
        finish("lock", vec![transfer, lock])
    }

    /// Add `amount` governance tokens to an existing lock.
    pub fn increase_lock_amount_txns(
        &self,
        sender: Address,
        amount: u64,
        params: &SuggestedParams,
    ) -> GovernanceResult<BuiltTxns> {
        let transfer = Transaction::asset_transfer(
            sender,
            self.address,
            self.governance_token()?,
            amount,
            params,
        );
        let increase = self.call(
            sender,
            AppCall::no_op(self.app_id, method_args(keys::INCREASE_LOCK_AMOUNT, &[])),
            params,
        );
        finish("increase_lock_amount", vec![transfer, increase])
    }

    /// Extend the lock by `duration_seconds`.
    pub fn extend_lock_txns(
        &self,
        sender: Address,
        duration_seconds: u64,
        params: &SuggestedParams,
    ) -> GovernanceResult<BuiltTxns> {
        if !self.config.lock_duration_in_range(duration_seconds) {
            return Err(GovernanceError::LockDurationOutOfRange {
                duration: duration_seconds,
                min: self.config.min_lock_seconds,
                max: self.config.max_lock_seconds,
            });
        }
        let extend = self.call(
            sender,
            AppCall::no_op(self.app_id, method_args(keys::EXTEND_LOCK, &[duration_seconds])),
            params,
        );
        finish("extend_lock", vec![extend])
    }

    /// Withdraw governance tokens from an expired lock.
    pub fn claim_txns(
        &self,
        sender: Address,
        params: &SuggestedParams,
    ) -> GovernanceResult<BuiltTxns> {
        let call = AppCall::no_op(self.app_id, method_args(keys::CLAIM, &[]))
            .with_foreign_assets([self.governance_token()?]);
        finish("claim_lock", vec![self.call(sender, call, params)])
    }

    /// Recompute `target`'s vebank balance. Any account may send this.
    pub fn update_vebank_data_txns(
        &self,
        sender: Address,
        target: Address,
        params: &SuggestedParams,
    ) -> GovernanceResult<BuiltTxns> {
        let call = AppCall::no_op(self.app_id, method_args(keys::UPDATE_VEBANK_DATA, &[]))
            .with_accounts([target]);
        finish("update_vebank_data", vec![self.call(sender, call, params)])
    }

    pub fn opt_in_txns(
        &self,
        sender: Address,
        params: &SuggestedParams,
    ) -> GovernanceResult<BuiltTxns> {
        finish(
            "opt_in_voting_escrow",
            vec![self.call(sender, AppCall::opt_in(self.app_id), params)],
        )
    }
}

fn finish(action: &'static str, txns: Vec<Transaction>) -> GovernanceResult<BuiltTxns> {
    let built = BuiltTxns::from_txns(txns)?;
    Metrics::txn_group_built(action, built.shape());
    Ok(built)
}
