//! Rewards program families.
//!
//! Element `i` of the pool family describes rewards program `i`; element
//! `i` of the user family tracks the user's accrual in that program.
//! Coefficients are 128-bit big-endian byte strings scaled by
//! [`REWARDS_SCALE`].

use crate::keys;
use algofi_core::{AssetId, DecodeResult, FieldSpec, IndexedRecord, Record, Schema};

/// Fixed-point scale of rewards coefficients.
pub const REWARDS_SCALE: u128 = 1_000_000_000_000_000_000;

const PROGRAM_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("program_counter", keys::REWARDS_PROGRAM_COUNTER_PREFIX),
    FieldSpec::uint("rewards_asset_id", keys::REWARDS_ASSET_ID_PREFIX),
    FieldSpec::uint("rewards_per_second", keys::REWARDS_PER_SECOND_PREFIX),
    FieldSpec::bytes("rewards_coefficient", keys::REWARDS_COEFFICIENT_PREFIX),
    FieldSpec::uint("rewards_issued", keys::REWARDS_ISSUED_PREFIX),
    FieldSpec::uint("rewards_payed", keys::REWARDS_PAYED_PREFIX),
];

/// Indexed family schema of a pool's rewards programs.
pub const REWARDS_PROGRAM_SCHEMA: Schema = Schema::new("rewards_program", PROGRAM_FIELDS);

const USER_PROGRAM_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("program_counter", keys::USER_REWARDS_PROGRAM_COUNTER_PREFIX),
    FieldSpec::bytes("rewards_coefficient", keys::USER_REWARDS_COEFFICIENT_PREFIX),
    FieldSpec::uint("unclaimed_rewards", keys::USER_UNCLAIMED_REWARDS_PREFIX),
];

/// Indexed family schema of a user's per-program accrual.
pub const USER_REWARDS_PROGRAM_SCHEMA: Schema =
    Schema::new("user_rewards_program", USER_PROGRAM_FIELDS);

/// One rewards program of a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardsProgramState {
    pub index: u64,
    /// Bumped each time the slot is reassigned to a new program.
    pub program_counter: u64,
    pub rewards_asset_id: AssetId,
    pub rewards_per_second: u64,
    pub rewards_coefficient: u128,
    pub rewards_issued: u64,
    pub rewards_payed: u64,
}

impl IndexedRecord for RewardsProgramState {
    const ITEM_SCHEMA: &'static Schema = &REWARDS_PROGRAM_SCHEMA;

    fn from_item(index: u64, record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            index,
            program_counter: record.uint("program_counter")?,
            rewards_asset_id: AssetId::new(record.uint("rewards_asset_id")?),
            rewards_per_second: record.uint("rewards_per_second")?,
            rewards_coefficient: record.u128_be("rewards_coefficient")?,
            rewards_issued: record.uint("rewards_issued")?,
            rewards_payed: record.uint("rewards_payed")?,
        })
    }
}

/// Raw user accrual record for one program index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserRewardsRecord {
    pub(crate) program_counter: u64,
    pub(crate) rewards_coefficient: u128,
    pub(crate) unclaimed_rewards: u64,
}

impl IndexedRecord for UserRewardsRecord {
    const ITEM_SCHEMA: &'static Schema = &USER_REWARDS_PROGRAM_SCHEMA;

    fn from_item(_index: u64, record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            program_counter: record.uint("program_counter")?,
            rewards_coefficient: record.u128_be("rewards_coefficient")?,
            unclaimed_rewards: record.uint("unclaimed_rewards")?,
        })
    }
}

/// A user's position in one rewards program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRewardsProgramState {
    pub index: u64,
    pub program_counter: u64,
    pub rewards_coefficient: u128,
    pub unclaimed_rewards: u64,
    /// Unclaimed plus accrued since the user's last checkpoint.
    pub unrealized_rewards: u64,
}

impl UserRewardsProgramState {
    pub(crate) fn new(
        index: u64,
        user: UserRewardsRecord,
        program: &RewardsProgramState,
        user_scaled_total_staked: u64,
    ) -> Self {
        let unrealized_rewards = if user.program_counter == program.program_counter {
            let delta = program
                .rewards_coefficient
                .saturating_sub(user.rewards_coefficient);
            let accrued = scale_down(u128::from(user_scaled_total_staked), delta);
            u64::try_from(u128::from(user.unclaimed_rewards).saturating_add(accrued))
                .unwrap_or(u64::MAX)
        } else {
            // The slot now holds a different program; only settled rewards remain.
            user.unclaimed_rewards
        };
        Self {
            index,
            program_counter: user.program_counter,
            rewards_coefficient: user.rewards_coefficient,
            unclaimed_rewards: user.unclaimed_rewards,
            unrealized_rewards,
        }
    }

    pub fn has_claimable_rewards(&self) -> bool {
        self.unrealized_rewards > 0
    }
}

/// `stake * coefficient / REWARDS_SCALE`, rounding down.
fn scale_down(stake: u128, coefficient: u128) -> u128 {
    match stake.checked_mul(coefficient) {
        Some(product) => product / REWARDS_SCALE,
        None => {
            let whole = stake.saturating_mul(coefficient / REWARDS_SCALE);
            let fraction = stake.saturating_mul(coefficient % REWARDS_SCALE) / REWARDS_SCALE;
            whole.saturating_add(fraction)
        }
    }
}
