//! Asset error types.

use algofi_core::AssetId;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(AssetId),

    #[error("Asset {asset_id} has no usable price: {price}")]
    NonPositivePrice { asset_id: AssetId, price: Decimal },

    #[error("USD value of {amount} units of asset {asset_id} overflows")]
    Overflow { asset_id: AssetId, amount: u64 },
}

pub type AssetResult<T> = Result<T, AssetError>;
