//! User governance state.
//!
//! Votes and delegation live in a per-user storage account whose address
//! is recorded in the user's admin local state. The user's own lock lives
//! in the user's voting escrow local state.

use crate::keys;
use crate::proposal::Proposal;
use algofi_core::{
    Address, AppId, DecodeResult, FieldSpec, RawState, Record, Schema, StateRecord,
};
use algofi_ledger::LocalStates;
use std::collections::BTreeMap;
use tracing::warn;

const USER_ESCROW_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("amount_locked", keys::voting_escrow::USER_AMOUNT_LOCKED),
    FieldSpec::uint("lock_start_time", keys::voting_escrow::USER_LOCK_START_TIME),
    FieldSpec::uint("lock_duration", keys::voting_escrow::USER_LOCK_DURATION),
    FieldSpec::uint("amount_vebank", keys::voting_escrow::USER_AMOUNT_VEBANK),
    FieldSpec::uint("boost_multiplier", keys::voting_escrow::USER_BOOST_MULTIPLIER),
];

/// Local state schema of a voting escrow participant.
pub const USER_VOTING_ESCROW_SCHEMA: Schema =
    Schema::new("user_voting_escrow", USER_ESCROW_FIELDS);

const USER_STORAGE_FIELDS: &[FieldSpec] = &[FieldSpec::bytes(
    "storage_address",
    keys::admin::USER_STORAGE_ADDRESS,
)];

/// Admin local state of the user's primary account.
pub const USER_STORAGE_SCHEMA: Schema = Schema::new("user_storage", USER_STORAGE_FIELDS);

const STORAGE_ADMIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("open_to_delegation", keys::admin::OPEN_TO_DELEGATION),
    FieldSpec::uint("delegator_count", keys::admin::DELEGATOR_COUNT),
    FieldSpec::bytes("delegating_to", keys::admin::DELEGATING_TO),
];

/// Admin local state of the storage account.
pub const STORAGE_ADMIN_SCHEMA: Schema = Schema::new("storage_admin", STORAGE_ADMIN_FIELDS);

const USER_PROPOSAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("for_or_against", keys::proposal::FOR_OR_AGAINST),
    FieldSpec::uint("voting_amount", keys::proposal::VOTING_AMOUNT),
];

/// Proposal local state of the storage account.
pub const USER_PROPOSAL_SCHEMA: Schema = Schema::new("user_proposal", USER_PROPOSAL_FIELDS);

/// A user's governance token lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserVotingEscrowState {
    pub amount_locked: u64,
    pub lock_start_time: u64,
    pub lock_duration: u64,
    pub amount_vebank: u64,
    pub boost_multiplier: u64,
}

impl StateRecord for UserVotingEscrowState {
    const SCHEMA: &'static Schema = &USER_VOTING_ESCROW_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            amount_locked: record.uint("amount_locked")?,
            lock_start_time: record.uint("lock_start_time")?,
            lock_duration: record.uint("lock_duration")?,
            amount_vebank: record.uint("amount_vebank")?,
            boost_multiplier: record.uint("boost_multiplier")?,
        })
    }
}

impl UserVotingEscrowState {
    pub fn lock_end_time(&self) -> u64 {
        self.lock_start_time.saturating_add(self.lock_duration)
    }
}

/// The storage account's vote on one proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProposalState {
    /// `true` for a vote in favour.
    pub voted_for: bool,
    pub voting_amount: u64,
}

impl StateRecord for UserProposalState {
    const SCHEMA: &'static Schema = &USER_PROPOSAL_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            voted_for: record.uint("for_or_against")? != 0,
            voting_amount: record.uint("voting_amount")?,
        })
    }
}

struct StorageAdminRecord {
    open_to_delegation: bool,
    delegator_count: u64,
    delegating_to: Address,
}

impl StateRecord for StorageAdminRecord {
    const SCHEMA: &'static Schema = &STORAGE_ADMIN_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            open_to_delegation: record.uint("open_to_delegation")? != 0,
            delegator_count: record.uint("delegator_count")?,
            delegating_to: record.address("delegating_to")?,
        })
    }
}

/// Decode the storage account address from the user's admin local state.
pub fn storage_address(admin_local: &RawState) -> DecodeResult<Address> {
    let record = algofi_core::decode(admin_local, &USER_STORAGE_SCHEMA)?;
    record.address("storage_address")
}

/// Delegation and votes recorded on the user's storage account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAdminState {
    pub storage_address: Address,
    pub open_to_delegation: bool,
    pub delegator_count: u64,
    pub delegating_to: Address,
    pub proposals: BTreeMap<AppId, UserProposalState>,
}

impl UserAdminState {
    /// Decode from the storage account's local states.
    ///
    /// Only proposals known to the loaded admin are considered; a proposal
    /// vote that fails to decode is logged and left out.
    pub fn from_storage_local_states(
        storage_address: Address,
        admin_app_id: AppId,
        proposals: &BTreeMap<AppId, Proposal>,
        storage_locals: &LocalStates,
    ) -> DecodeResult<Self> {
        let admin_local = storage_locals
            .get(&admin_app_id)
            .cloned()
            .unwrap_or_default();
        let admin = StorageAdminRecord::decode_state(&admin_local)?;

        let mut votes = BTreeMap::new();
        for app_id in proposals.keys() {
            let Some(raw) = storage_locals.get(app_id) else {
                continue;
            };
            match UserProposalState::decode_state(raw) {
                Ok(vote) => {
                    votes.insert(*app_id, vote);
                }
                Err(error) => {
                    warn!(%storage_address, app_id = %app_id, %error, "Proposal vote skipped");
                }
            }
        }

        Ok(Self {
            storage_address,
            open_to_delegation: admin.open_to_delegation,
            delegator_count: admin.delegator_count,
            delegating_to: admin.delegating_to,
            proposals: votes,
        })
    }
}

/// A user's governance state. Parts the user has not opted into, or that
/// failed to decode, are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserGovernanceState {
    pub address: Address,
    pub voting_escrow: Option<UserVotingEscrowState>,
    pub admin: Option<UserAdminState>,
}
