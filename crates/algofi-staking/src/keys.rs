//! Staking program key and argument strings.
//!
//! These are the literal strings the deployed programs use; they are part
//! of the wire contract and must match byte for byte.

// Pool global state
pub const ADMIN: &str = "a";
pub const REWARDS_PROGRAM_COUNT: &str = "rpc";
pub const RPS_PUSHER: &str = "rpsp";
pub const CONTRACT_UPDATE_DELAY: &str = "cud";
pub const CONTRACT_UPDATE_TIME: &str = "cut";
pub const BOOST_MULTIPLIER_APP_ID: &str = "bmai";
pub const REWARDS_MANAGER_APP_ID: &str = "rmai";
pub const EXTERNAL_BOOST_MULTIPLIER: &str = "ebm";
pub const ASSET_ID: &str = "ai";
pub const TOTAL_STAKED: &str = "ts";
pub const SCALED_TOTAL_STAKED: &str = "sts";
pub const LATEST_TIME: &str = "lt";

// Pool rewards program family
pub const REWARDS_PROGRAM_COUNTER_PREFIX: &str = "rpc_";
pub const REWARDS_ASSET_ID_PREFIX: &str = "rai_";
pub const REWARDS_PER_SECOND_PREFIX: &str = "rps_";
pub const REWARDS_COEFFICIENT_PREFIX: &str = "rc_";
pub const REWARDS_ISSUED_PREFIX: &str = "ri_";
pub const REWARDS_PAYED_PREFIX: &str = "rp_";

// User local state
pub const USER_TOTAL_STAKED: &str = "uts";
pub const USER_SCALED_TOTAL_STAKED: &str = "usts";
pub const BOOST_MULTIPLIER: &str = "bm";

// User rewards program family
pub const USER_REWARDS_PROGRAM_COUNTER_PREFIX: &str = "urpc_";
pub const USER_REWARDS_COEFFICIENT_PREFIX: &str = "urc_";
pub const USER_UNCLAIMED_REWARDS_PREFIX: &str = "uur_";

// Admin operations
pub const SCHEDULE_CONTRACT_UPDATE: &str = "scu";
pub const INCREASE_CONTRACT_UPDATE_DELAY: &str = "icud";
pub const SET_REWARDS_MANAGER_APP_ID: &str = "srma";
pub const SET_BOOST_APP_ID: &str = "sbai";
pub const SET_REWARDS_PROGRAM: &str = "srp";
pub const UPDATE_REWARDS_PROGRAM: &str = "urp";
pub const OPT_INTO_ASSET: &str = "oia";
pub const OPT_INTO_REWARDS_MANAGER: &str = "oirm";
pub const UPDATE_REWARDS_PER_SECOND: &str = "urps";

// User operations
pub const FARM_OPS: &str = "fo";
pub const STAKE: &str = "s";
pub const UNSTAKE: &str = "u";
pub const CLAIM_REWARDS: &str = "cr";
pub const UPDATE_TARGET_USER: &str = "utu";
pub const UPDATE_VEBANK_DATA: &str = "update_vebank_data";
