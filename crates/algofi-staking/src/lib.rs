//! Staking pools.
//!
//! A pool holds one staked asset and pays out up to `rpc` concurrent
//! rewards programs, each stored as an indexed family in the pool's
//! global state. Users carry a matching family in their local state.
//!
//! # Key Components
//!
//! - [`StakingPool`]: pool state plus its rewards programs
//! - [`UserStakingState`]: a user's stake and per-program accrual
//! - [`StakingClient`]: loads every configured pool, builds stake, unstake,
//!   claim and opt-in transactions

pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod pool;
pub mod rewards_program;
pub mod user;

pub use client::StakingClient;
pub use config::{PoolConfig, StakingConfig};
pub use error::{StakingError, StakingResult};
pub use pool::{PoolState, StakingPool};
pub use rewards_program::{RewardsProgramState, UserRewardsProgramState, REWARDS_SCALE};
pub use user::{StakingUser, UserStakingState};
