//! User staking state.

use crate::error::{StakingError, StakingResult};
use crate::keys;
use crate::pool::StakingPool;
use crate::rewards_program::{UserRewardsProgramState, UserRewardsRecord};
use algofi_core::{
    decode_family, Address, AppId, DecodeResult, FieldSpec, RawState, Record, Schema, StateRecord,
};
use algofi_ledger::LocalStates;
use std::collections::BTreeMap;
use tracing::warn;

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("total_staked", keys::USER_TOTAL_STAKED),
    FieldSpec::uint("scaled_total_staked", keys::USER_SCALED_TOTAL_STAKED),
    FieldSpec::uint("boost_multiplier", keys::BOOST_MULTIPLIER),
];

/// Local state schema of a pool participant.
pub const USER_STAKING_SCHEMA: Schema = Schema::new("user_staking", USER_FIELDS);

struct UserStakeRecord {
    total_staked: u64,
    scaled_total_staked: u64,
    boost_multiplier: u64,
}

impl StateRecord for UserStakeRecord {
    const SCHEMA: &'static Schema = &USER_STAKING_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            total_staked: record.uint("total_staked")?,
            scaled_total_staked: record.uint("scaled_total_staked")?,
            boost_multiplier: record.uint("boost_multiplier")?,
        })
    }
}

/// A user's position in one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStakingState {
    pub app_id: AppId,
    pub total_staked: u64,
    pub scaled_total_staked: u64,
    pub boost_multiplier: u64,
    /// One entry per pool rewards program, ordered by index.
    pub rewards_programs: Vec<UserRewardsProgramState>,
}

impl UserStakingState {
    /// Decode the user's local state for `pool`.
    ///
    /// The user family is sized by the pool's own rewards program count.
    pub fn from_local_state(pool: &StakingPool, raw: &RawState) -> StakingResult<Self> {
        let programs = pool
            .rewards_programs()
            .ok_or(StakingError::RewardsProgramsUnavailable(pool.app_id()))?;
        let stake = UserStakeRecord::decode_state(raw)?;
        let records = decode_family::<UserRewardsRecord>(raw, programs.len() as u64)?;

        let rewards_programs = records
            .into_iter()
            .zip(programs)
            .map(|(record, program)| {
                UserRewardsProgramState::new(
                    program.index,
                    record,
                    program,
                    stake.scaled_total_staked,
                )
            })
            .collect();

        Ok(Self {
            app_id: pool.app_id(),
            total_staked: stake.total_staked,
            scaled_total_staked: stake.scaled_total_staked,
            boost_multiplier: stake.boost_multiplier,
            rewards_programs,
        })
    }

    pub fn rewards_program(&self, index: u64) -> Option<&UserRewardsProgramState> {
        self.rewards_programs.iter().find(|p| p.index == index)
    }

    /// Indices with strictly positive unrealized rewards.
    pub fn claimable_indices(&self) -> Vec<u64> {
        self.rewards_programs
            .iter()
            .filter(|p| p.has_claimable_rewards())
            .map(|p| p.index)
            .collect()
    }
}

/// A user's staking positions across every loaded pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingUser {
    pub address: Address,
    pub states: BTreeMap<AppId, UserStakingState>,
}

impl StakingUser {
    /// Decode the user's state in every pool it has opted into.
    ///
    /// A pool whose user state fails to decode is logged and left out.
    pub fn from_local_states(
        address: Address,
        pools: &BTreeMap<AppId, StakingPool>,
        locals: &LocalStates,
    ) -> Self {
        let mut states = BTreeMap::new();
        for (app_id, pool) in pools {
            let Some(raw) = locals.get(app_id) else {
                continue;
            };
            match UserStakingState::from_local_state(pool, raw) {
                Ok(state) => {
                    states.insert(*app_id, state);
                }
                Err(error) => {
                    warn!(%address, app_id = %app_id, %error, "User staking state skipped");
                }
            }
        }
        Self { address, states }
    }

    pub fn state(&self, app_id: AppId) -> Option<&UserStakingState> {
        self.states.get(&app_id)
    }

    pub fn is_opted_in(&self, app_id: AppId) -> bool {
        self.states.contains_key(&app_id)
    }
}
