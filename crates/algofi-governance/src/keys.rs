//! Governance program key and argument strings.
//!
//! Deployment-specific: these strings match the governance programs this
//! client has been run against and are not a published wire contract.
//! Check them against the target deployment before relying on them.

/// Voting escrow state and calls.
pub mod voting_escrow {
    pub const TOTAL_LOCKED: &str = "tl";
    pub const TOTAL_VEBANK: &str = "tv";
    pub const ASSET_ID: &str = "ai";

    pub const USER_AMOUNT_LOCKED: &str = "ual";
    pub const USER_LOCK_START_TIME: &str = "ulst";
    pub const USER_LOCK_DURATION: &str = "uld";
    pub const USER_AMOUNT_VEBANK: &str = "uav";
    pub const USER_BOOST_MULTIPLIER: &str = "ubm";

    pub const LOCK: &str = "lock";
    pub const EXTEND_LOCK: &str = "extend_lock";
    pub const INCREASE_LOCK_AMOUNT: &str = "increase_lock_amount";
    pub const CLAIM: &str = "claim";
    pub const UPDATE_VEBANK_DATA: &str = "update_vebank_data";
}

/// Admin state.
pub mod admin {
    pub const VOTING_ESCROW_APP_ID: &str = "veai";
    pub const PROPOSAL_FACTORY_APP_ID: &str = "pfai";
    pub const QUORUM_VALUE: &str = "qv";
    pub const SUPER_MAJORITY: &str = "sm";
    pub const PROPOSAL_DURATION: &str = "pd";
    pub const EXECUTION_DELAY: &str = "ed";

    pub const USER_STORAGE_ADDRESS: &str = "usa";
    pub const OPEN_TO_DELEGATION: &str = "otd";
    pub const DELEGATOR_COUNT: &str = "dc";
    pub const DELEGATING_TO: &str = "dt";
}

/// Proposal state.
pub mod proposal {
    pub const VOTES_FOR: &str = "fv";
    pub const VOTES_AGAINST: &str = "av";
    pub const VOTE_CLOSE_TIME: &str = "vct";
    pub const EXECUTION_TIME: &str = "et";
    pub const EXECUTED: &str = "ex";
    pub const CANCELED_BY_EMERGENCY_DAO: &str = "cbed";

    pub const FOR_OR_AGAINST: &str = "foa";
    pub const VOTING_AMOUNT: &str = "uvam";
}
