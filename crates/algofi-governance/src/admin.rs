//! Governance admin program.

use crate::keys::admin as keys;
use algofi_core::{Address, AppId, DecodeResult, FieldSpec, RawState, Record, Schema, StateRecord};

const ADMIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("voting_escrow_app_id", keys::VOTING_ESCROW_APP_ID),
    FieldSpec::uint("proposal_factory_app_id", keys::PROPOSAL_FACTORY_APP_ID),
    FieldSpec::uint("quorum_value", keys::QUORUM_VALUE),
    FieldSpec::uint("super_majority", keys::SUPER_MAJORITY),
    FieldSpec::uint("proposal_duration", keys::PROPOSAL_DURATION),
    FieldSpec::uint("execution_delay", keys::EXECUTION_DELAY),
];

/// Global state schema of the admin program.
pub const ADMIN_SCHEMA: Schema = Schema::new("governance_admin", ADMIN_FIELDS);

/// Governance parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub app_id: AppId,
    pub voting_escrow_app_id: AppId,
    pub proposal_factory_app_id: AppId,
    pub quorum_value: u64,
    pub super_majority: u64,
    pub proposal_duration: u64,
    pub execution_delay: u64,
}

struct AdminState(Admin);

impl StateRecord for AdminState {
    const SCHEMA: &'static Schema = &ADMIN_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        Ok(Self(Admin {
            app_id: AppId::new(0),
            voting_escrow_app_id: AppId::new(record.uint("voting_escrow_app_id")?),
            proposal_factory_app_id: AppId::new(record.uint("proposal_factory_app_id")?),
            quorum_value: record.uint("quorum_value")?,
            super_majority: record.uint("super_majority")?,
            proposal_duration: record.uint("proposal_duration")?,
            execution_delay: record.uint("execution_delay")?,
        }))
    }
}

impl Admin {
    pub fn from_state(app_id: AppId, raw: &RawState) -> DecodeResult<Self> {
        let AdminState(admin) = AdminState::decode_state(raw)?;
        Ok(Self { app_id, ..admin })
    }

    /// Escrow address of the proposal factory. Proposals are the
    /// applications this account has created.
    pub fn proposal_factory_address(&self) -> Address {
        Address::for_application(self.proposal_factory_app_id)
    }
}
