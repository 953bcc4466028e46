//! Staking pool state and transaction recipes.

use crate::config::PoolConfig;
use crate::error::{StakingError, StakingResult};
use crate::keys;
use crate::rewards_program::RewardsProgramState;
use crate::user::UserStakingState;
use algofi_core::{
    decode_family, Address, AppId, AssetId, DecodeResult, FieldSpec, RawState, Record, Schema,
    StateRecord,
};
use algofi_telemetry::Metrics;
use algofi_txn::{
    method_args, AppCall, BuiltTxns, FeePolicy, SuggestedParams, Transaction,
};
use tracing::warn;

const POOL_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("latest_time", keys::LATEST_TIME),
    FieldSpec::uint("boost_multiplier_app_id", keys::BOOST_MULTIPLIER_APP_ID),
    FieldSpec::uint("total_staked", keys::TOTAL_STAKED),
    FieldSpec::uint("scaled_total_staked", keys::SCALED_TOTAL_STAKED),
    FieldSpec::uint("rewards_manager_app_id", keys::REWARDS_MANAGER_APP_ID),
    FieldSpec::uint("rewards_program_count", keys::REWARDS_PROGRAM_COUNT),
];

/// Global state schema of a staking pool.
pub const POOL_SCHEMA: Schema = Schema::new("staking_pool", POOL_FIELDS);

/// Stake call prepays the boost multiplier inner call.
const STAKE_FEE: FeePolicy = FeePolicy::Multiple(2);
/// Unstake additionally pays the asset transfer back to the user.
const UNSTAKE_FEE: FeePolicy = FeePolicy::Multiple(3);

/// Decoded pool global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    pub latest_time: u64,
    pub boost_multiplier_app_id: AppId,
    pub total_staked: u64,
    pub scaled_total_staked: u64,
    pub rewards_manager_app_id: AppId,
    pub rewards_program_count: u64,
}

impl StateRecord for PoolState {
    const SCHEMA: &'static Schema = &POOL_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            latest_time: record.uint("latest_time")?,
            boost_multiplier_app_id: AppId::new(record.uint("boost_multiplier_app_id")?),
            total_staked: record.uint("total_staked")?,
            scaled_total_staked: record.uint("scaled_total_staked")?,
            rewards_manager_app_id: AppId::new(record.uint("rewards_manager_app_id")?),
            rewards_program_count: record.uint("rewards_program_count")?,
        })
    }
}

/// A loaded staking pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingPool {
    pub config: PoolConfig,
    pub address: Address,
    pub state: PoolState,
    /// `None` when the rewards program family failed to decode.
    rewards_programs: Option<Vec<RewardsProgramState>>,
}

impl StakingPool {
    /// Decode a pool.
    ///
    /// Scalar fields must all be present. An inconsistent rewards program
    /// family is withheld as a whole and logged; the pool itself still loads.
    pub fn from_state(config: PoolConfig, raw: &RawState) -> DecodeResult<Self> {
        let state = PoolState::decode_state(raw)?;
        let family = decode_family::<RewardsProgramState>(raw, state.rewards_program_count);
        let rewards_programs = match family {
            Ok(programs) => Some(programs),
            Err(error) => {
                warn!(app_id = %config.app_id, %error, "Rewards programs withheld");
                None
            }
        };
        Ok(Self {
            address: Address::for_application(config.app_id),
            config,
            state,
            rewards_programs,
        })
    }

    pub fn app_id(&self) -> AppId {
        self.config.app_id
    }

    pub fn asset_id(&self) -> AssetId {
        self.config.asset_id
    }

    /// Rewards programs ordered by index, or `None` if withheld.
    pub fn rewards_programs(&self) -> Option<&[RewardsProgramState]> {
        self.rewards_programs.as_deref()
    }

    pub fn rewards_program(&self, index: u64) -> Option<&RewardsProgramState> {
        self.rewards_programs()?
            .get(usize::try_from(index).ok()?)
    }

    fn boost_multiplier_app_id(&self) -> StakingResult<AppId> {
        let app_id = self.state.boost_multiplier_app_id;
        if app_id.is_unset() {
            return Err(StakingError::MissingReference {
                app_id: self.app_id(),
                reference: "boost multiplier app id",
            });
        }
        Ok(app_id)
    }

    /// Stake `amount` of the pool asset: transfer into the pool followed by
    /// the stake call, grouped.
    pub fn stake_txns(
        &self,
        sender: Address,
        amount: u64,
        params: &SuggestedParams,
    ) -> StakingResult<BuiltTxns> {
        let transfer =
            Transaction::asset_transfer(sender, self.address, self.asset_id(), amount, params);
        let call = AppCall::no_op(self.app_id(), method_args(keys::STAKE, &[]))
            .with_foreign_apps([self.boost_multiplier_app_id()?]);
        let stake = Transaction::app_call(sender, call, STAKE_FEE, params);
        finish("stake", vec![transfer, stake])
    }

    /// Unstake `amount` of the pool asset.
    pub fn unstake_txns(
        &self,
        sender: Address,
        amount: u64,
        params: &SuggestedParams,
    ) -> StakingResult<BuiltTxns> {
        let call = AppCall::no_op(self.app_id(), method_args(keys::UNSTAKE, &[amount]))
            .with_foreign_assets([self.asset_id()])
            .with_foreign_apps([self.boost_multiplier_app_id()?]);
        let unstake = Transaction::app_call(sender, call, UNSTAKE_FEE, params);
        finish("unstake", vec![unstake])
    }

    /// Claim every rewards program in which `user` has unrealized rewards.
    ///
    /// `user` must be freshly loaded. Yields [`BuiltTxns::Empty`] when
    /// nothing is claimable.
    pub fn claim_txns(
        &self,
        sender: Address,
        user: &UserStakingState,
        params: &SuggestedParams,
    ) -> StakingResult<BuiltTxns> {
        let programs = self
            .rewards_programs()
            .ok_or(StakingError::RewardsProgramsUnavailable(self.app_id()))?;

        let mut txns = Vec::new();
        for program in programs {
            let claimable = user
                .rewards_program(program.index)
                .is_some_and(|p| p.has_claimable_rewards());
            if !claimable {
                continue;
            }
            let call = AppCall::no_op(
                self.app_id(),
                method_args(keys::CLAIM_REWARDS, &[program.index]),
            )
            .with_foreign_assets([program.rewards_asset_id]);
            txns.push(Transaction::app_call(sender, call, FeePolicy::Base, params));
        }
        finish("claim", txns)
    }

    /// Opt `sender` into the pool.
    pub fn opt_in_txns(
        &self,
        sender: Address,
        params: &SuggestedParams,
    ) -> StakingResult<BuiltTxns> {
        let opt_in =
            Transaction::app_call(sender, AppCall::opt_in(self.app_id()), FeePolicy::Base, params);
        finish("opt_in", vec![opt_in])
    }
}

fn finish(action: &'static str, txns: Vec<Transaction>) -> StakingResult<BuiltTxns> {
    let built = BuiltTxns::from_txns(txns)?;
    Metrics::txn_group_built(action, built.shape());
    Ok(built)
}
