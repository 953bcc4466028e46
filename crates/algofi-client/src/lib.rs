//! Algofi SDK client.
//!
//! [`AlgofiClient`] owns one client per product line plus the asset book
//! and loads them in the order declared by [`LoadStage`]: the price feed
//! and the lending, staking and governance programs load concurrently,
//! and asset pricing runs only once all of them have settled.

pub mod client;
pub mod config;
pub mod error;
pub mod stages;
pub mod user;

pub use client::{AlgofiClient, LoadSummary};
pub use config::{ClientConfig, NetworkConfig};
pub use error::{ClientError, ClientResult};
pub use stages::{LoadStage, StageTracker};
pub use user::AlgofiUser;
