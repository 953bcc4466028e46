//! Governance programs.
//!
//! # Key Components
//!
//! - [`VotingEscrow`]: locked governance token totals and the lock, extend,
//!   increase, claim, vebank update and opt-in recipes
//! - [`Admin`]: governance parameters and the proposal factory
//! - [`Proposal`]: vote tallies of one proposal
//! - [`UserGovernanceState`]: a user's lock and, through its storage
//!   account, delegation and votes
//! - [`GovernanceClient`]: loads everything above as one snapshot

pub mod admin;
pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod proposal;
pub mod user;
pub mod voting_escrow;

pub use admin::Admin;
pub use client::{GovernanceClient, GovernanceSnapshot};
pub use config::GovernanceConfig;
pub use error::{GovernanceError, GovernanceResult};
pub use proposal::Proposal;
pub use user::{UserAdminState, UserGovernanceState, UserProposalState, UserVotingEscrowState};
pub use voting_escrow::VotingEscrow;
