//! Lending markets.
//!
//! # Key Components
//!
//! - [`Market`]: decoded market state with its oracle price and the
//!   b-asset to underlying conversion
//! - [`LendingClient`]: loads every configured market and publishes them
//!   as one snapshot

pub mod client;
pub mod config;
pub mod error;
pub mod market;

pub use client::LendingClient;
pub use config::{LendingConfig, MarketConfig, MarketType};
pub use error::{LendingError, LendingResult};
pub use market::{AssetAmount, Market, MarketState, Oracle};
