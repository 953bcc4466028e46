//! Governance proposals.

use crate::keys::proposal as keys;
use algofi_core::{Address, AppId, DecodeResult, FieldSpec, RawState, Record, Schema, StateRecord};

const PROPOSAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("votes_for", keys::VOTES_FOR),
    FieldSpec::uint("votes_against", keys::VOTES_AGAINST),
    FieldSpec::uint("vote_close_time", keys::VOTE_CLOSE_TIME),
    FieldSpec::uint("execution_time", keys::EXECUTION_TIME),
    FieldSpec::uint("executed", keys::EXECUTED),
    FieldSpec::uint("canceled_by_emergency_dao", keys::CANCELED_BY_EMERGENCY_DAO),
];

/// Global state schema of a proposal.
pub const PROPOSAL_SCHEMA: Schema = Schema::new("proposal", PROPOSAL_FIELDS);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub app_id: AppId,
    pub address: Address,
    pub votes_for: u64,
    pub votes_against: u64,
    pub vote_close_time: u64,
    pub execution_time: u64,
    pub executed: bool,
    pub canceled_by_emergency_dao: bool,
}

struct ProposalState {
    votes_for: u64,
    votes_against: u64,
    vote_close_time: u64,
    execution_time: u64,
    executed: bool,
    canceled_by_emergency_dao: bool,
}

impl StateRecord for ProposalState {
    const SCHEMA: &'static Schema = &PROPOSAL_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        Ok(Self {
            votes_for: record.uint("votes_for")?,
            votes_against: record.uint("votes_against")?,
            vote_close_time: record.uint("vote_close_time")?,
            execution_time: record.uint("execution_time")?,
            executed: record.uint("executed")? != 0,
            canceled_by_emergency_dao: record.uint("canceled_by_emergency_dao")? != 0,
        })
    }
}

impl Proposal {
    pub fn from_state(app_id: AppId, raw: &RawState) -> DecodeResult<Self> {
        let state = ProposalState::decode_state(raw)?;
        Ok(Self {
            app_id,
            address: Address::for_application(app_id),
            votes_for: state.votes_for,
            votes_against: state.votes_against,
            vote_close_time: state.vote_close_time,
            execution_time: state.execution_time,
            executed: state.executed,
            canceled_by_emergency_dao: state.canceled_by_emergency_dao,
        })
    }

    /// Voting is open strictly before the close time.
    pub fn is_open(&self, now: u64) -> bool {
        now < self.vote_close_time && !self.executed && !self.canceled_by_emergency_dao
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn proposal_state(votes_for: u64) -> RawState {
        RawState::new()
            .with_uint("fv", votes_for)
            .with_uint("av", 10)
            .with_uint("vct", 2_000)
            .with_uint("et", 0)
            .with_uint("ex", 0)
            .with_uint("cbed", 0)
    }

    #[test]
    fn test_decode_proposal() {
        let proposal = Proposal::from_state(AppId::new(900), &proposal_state(55)).unwrap();
        assert_eq!(proposal.votes_for, 55);
        assert!(!proposal.executed);
        assert!(proposal.is_open(1_999));
        assert!(!proposal.is_open(2_000));
    }

    #[test]
    fn test_canceled_proposal_closed() {
        let raw = proposal_state(1).with_uint("cbed", 1);
        let proposal = Proposal::from_state(AppId::new(900), &raw).unwrap();
        assert!(!proposal.is_open(0));
    }
}
