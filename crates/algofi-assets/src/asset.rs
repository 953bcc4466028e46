//! Priced assets and USD conversion.

use crate::error::{AssetError, AssetResult};
use algofi_core::{from_base_units, AssetId};
use algofi_telemetry::Metrics;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Where an asset's price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Analytics feed.
    Feed,
    /// Lending market oracle.
    Oracle,
    /// Converted through the owning market's b-asset exchange rate.
    Derived,
}

/// An asset with its USD price per whole token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub asset_id: AssetId,
    pub name: String,
    pub decimals: u8,
    pub price: Decimal,
    pub source: PriceSource,
}

/// Assets keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssetBook {
    assets: BTreeMap<AssetId, Asset>,
}

impl AssetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the whole entry for `asset.asset_id`.
    pub fn insert(&mut self, asset: Asset) {
        self.assets.insert(asset.asset_id, asset);
    }

    pub fn get(&self, asset_id: AssetId) -> Option<&Asset> {
        self.assets.get(&asset_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Known asset with a strictly positive price.
    pub fn priced(&self, asset_id: AssetId) -> AssetResult<&Asset> {
        let asset = self
            .get(asset_id)
            .ok_or(AssetError::UnknownAsset(asset_id))?;
        if asset.price <= Decimal::ZERO {
            return Err(AssetError::NonPositivePrice {
                asset_id,
                price: asset.price,
            });
        }
        Ok(asset)
    }

    /// USD value of `amount` base units, or why it cannot be computed.
    pub fn value(&self, asset_id: AssetId, amount: u64) -> AssetResult<Decimal> {
        let asset = self.priced(asset_id)?;
        from_base_units(amount, asset.decimals)
            .checked_mul(asset.price)
            .ok_or(AssetError::Overflow { asset_id, amount })
    }

    /// USD value of `amount` base units.
    ///
    /// Returns zero for an unknown or unpriced asset and for a value too
    /// large to represent; the miss is logged and counted.
    pub fn to_usd(&self, asset_id: AssetId, amount: u64) -> Decimal {
        match self.value(asset_id, amount) {
            Ok(usd) => usd,
            Err(error) => {
                warn!(asset_id = %asset_id, %error, "USD lookup failed");
                Metrics::price_lookup_failed();
                Decimal::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn asset(id: u64, decimals: u8, price: Decimal) -> Asset {
        Asset {
            asset_id: AssetId::new(id),
            name: format!("A{id}"),
            decimals,
            price,
            source: PriceSource::Feed,
        }
    }

    #[test]
    fn test_to_usd() {
        let mut book = AssetBook::new();
        book.insert(asset(1, 6, dec!(1.02)));
        assert_eq!(book.to_usd(AssetId::new(1), 2_500_000), dec!(2.55));
        assert_eq!(book.to_usd(AssetId::new(1), 0), Decimal::ZERO);
    }

    #[test]
    fn test_to_usd_unknown_or_unpriced_is_zero() {
        let mut book = AssetBook::new();
        book.insert(asset(2, 6, Decimal::ZERO));
        book.insert(asset(3, 6, dec!(-1)));

        assert_eq!(book.to_usd(AssetId::new(1), 1_000_000), Decimal::ZERO);
        assert_eq!(book.to_usd(AssetId::new(2), 1_000_000), Decimal::ZERO);
        assert_eq!(book.to_usd(AssetId::new(3), 1_000_000), Decimal::ZERO);
        assert!(matches!(
            book.priced(AssetId::new(2)),
            Err(AssetError::NonPositivePrice { .. })
        ));
        assert_eq!(
            book.priced(AssetId::new(1)),
            Err(AssetError::UnknownAsset(AssetId::new(1)))
        );
    }

    #[test]
    fn test_overflowing_value_is_zero() {
        let mut book = AssetBook::new();
        book.insert(asset(4, 0, dec!(10000000000000000)));

        assert_eq!(
            book.value(AssetId::new(4), u64::MAX),
            Err(AssetError::Overflow {
                asset_id: AssetId::new(4),
                amount: u64::MAX
            })
        );
        assert_eq!(book.to_usd(AssetId::new(4), u64::MAX), Decimal::ZERO);
        assert_eq!(book.to_usd(AssetId::new(4), 3), dec!(30000000000000000));
    }

    #[test]
    fn test_insert_replaces_entry() {
        let mut book = AssetBook::new();
        book.insert(asset(1, 6, dec!(1)));
        book.insert(Asset {
            name: "USDC".to_string(),
            ..asset(1, 6, dec!(2))
        });
        assert_eq!(book.len(), 1);
        let stored = book.get(AssetId::new(1)).unwrap();
        assert_eq!(stored.name, "USDC");
        assert_eq!(stored.price, dec!(2));
    }
}
