//! Asset prices for the Algofi SDK.
//!
//! Prices come from the analytics feed and from loaded lending markets.
//! [`AssetPriceAggregator`] merges both into an [`AssetBook`], with
//! on-chain prices taking precedence.

pub mod aggregator;
pub mod asset;
pub mod error;

pub use aggregator::AssetPriceAggregator;
pub use asset::{Asset, AssetBook, PriceSource};
pub use error::{AssetError, AssetResult};
