//! Merging feed prices with on-chain market prices.

use crate::asset::{Asset, AssetBook, PriceSource};
use algofi_core::{one_unit, AppId, AssetConfig, AssetId, AssetTable};
use algofi_ledger::PriceRecord;
use algofi_lending::Market;
use algofi_telemetry::Metrics;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Builds the asset book from the feed and the loaded markets.
#[derive(Debug, Clone, Copy)]
pub struct AssetPriceAggregator<'a> {
    assets: &'a AssetTable,
}

impl<'a> AssetPriceAggregator<'a> {
    /// `assets` supplies name and decimals for market assets.
    pub fn new(assets: &'a AssetTable) -> Self {
        Self { assets }
    }

    /// Build a fresh book.
    ///
    /// 1. Feed prices seed the book.
    /// 2. Each market's oracle price replaces its underlying asset's entry.
    /// 3. Each market with a transferable b asset prices one whole b token
    ///    through its exchange rate.
    ///
    /// Markets are visited in ascending app id order; when two markets share
    /// an underlying asset the later one wins. A b asset whose valuation
    /// overflows is left out of the book.
    pub fn build(&self, external: &[PriceRecord], markets: &BTreeMap<AppId, Market>) -> AssetBook {
        let mut book = AssetBook::new();
        for record in external {
            book.insert(Asset {
                asset_id: record.asset_id,
                name: record.name.clone(),
                decimals: record.decimals,
                price: record.price,
                source: PriceSource::Feed,
            });
        }
        let seeded = book.len();

        for market in markets.values() {
            let Some(underlying) = self.asset_config(market, market.underlying_asset_id()) else {
                continue;
            };
            book.insert(Asset {
                asset_id: underlying.asset_id,
                name: underlying.name.clone(),
                decimals: underlying.decimals,
                price: market.oracle().price(),
                source: PriceSource::Oracle,
            });

            if !market.market_type().has_transferable_b_asset() {
                continue;
            }
            let Some(b_asset) = self.asset_config(market, market.b_asset_id()) else {
                continue;
            };
            let Some(one_b_asset) =
                market.b_asset_to_asset_amount(one_unit(b_asset.decimals), underlying.decimals)
            else {
                warn!(
                    app_id = %market.app_id(),
                    asset_id = %b_asset.asset_id,
                    "b asset valuation overflowed, price skipped"
                );
                Metrics::price_derivation_failed();
                continue;
            };
            book.insert(Asset {
                asset_id: b_asset.asset_id,
                name: b_asset.name.clone(),
                decimals: b_asset.decimals,
                price: one_b_asset.usd,
                source: PriceSource::Derived,
            });
        }

        debug!(
            seeded,
            markets = markets.len(),
            assets = book.len(),
            "Asset prices aggregated"
        );
        book
    }

    fn asset_config(&self, market: &Market, asset_id: AssetId) -> Option<&'a AssetConfig> {
        let config = self.assets.get(asset_id);
        if config.is_none() {
            warn!(
                app_id = %market.app_id(),
                asset_id = %asset_id,
                "Market asset missing from asset table, price skipped"
            );
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algofi_core::RawState;
    use algofi_lending::{MarketConfig, MarketType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const USDC: u64 = 10;
    const B_USDC: u64 = 11;
    const ALGO: u64 = 1;
    const B_ALGO: u64 = 2;

    fn table() -> AssetTable {
        AssetTable::new(vec![
            AssetConfig::new(USDC, "USDC", 6),
            AssetConfig::new(B_USDC, "bUSDC", 6),
            AssetConfig::new(ALGO, "ALGO", 6),
            AssetConfig::new(B_ALGO, "bALGO", 6),
        ])
    }

    fn market_state(price: u64, bac: u64) -> RawState {
        RawState::new()
            .with_uint("uc", 800)
            .with_uint("ub", 300)
            .with_uint("ur", 100)
            .with_uint("bac", bac)
            .with_uint("bsc", 0)
            .with_uint("oai", 7)
            .with_uint("lop", price)
            .with_uint("lopt", 1_700_000_000)
            .with_uint("opsf", 1_000_000)
    }

    fn market_with_state(app: u64, underlying: u64, b_asset: u64, raw: &RawState) -> Market {
        let config = MarketConfig {
            name: format!("market-{app}"),
            app_id: AppId::new(app),
            underlying_asset_id: AssetId::new(underlying),
            b_asset_id: AssetId::new(b_asset),
            market_type: MarketType::Standard,
        };
        Market::from_state(config, raw).unwrap()
    }

    fn market(
        app: u64,
        underlying: u64,
        b_asset: u64,
        market_type: MarketType,
        price: u64,
    ) -> Market {
        let config = MarketConfig {
            name: format!("market-{app}"),
            app_id: AppId::new(app),
            underlying_asset_id: AssetId::new(underlying),
            b_asset_id: AssetId::new(b_asset),
            market_type,
        };
        Market::from_state(config, &market_state(price, 500)).unwrap()
    }

    fn markets(list: Vec<Market>) -> BTreeMap<AppId, Market> {
        list.into_iter().map(|m| (m.app_id(), m)).collect()
    }

    fn feed(asset_id: u64, price: Decimal) -> PriceRecord {
        PriceRecord {
            asset_id: AssetId::new(asset_id),
            name: "feed".to_string(),
            decimals: 6,
            price,
        }
    }

    #[test]
    fn test_oracle_overrides_feed() {
        let table = table();
        let book = AssetPriceAggregator::new(&table).build(
            &[feed(USDC, dec!(1.00))],
            &markets(vec![market(100, USDC, B_USDC, MarketType::Standard, 1_020_000)]),
        );

        let usdc = book.get(AssetId::new(USDC)).unwrap();
        assert_eq!(usdc.price, dec!(1.02));
        assert_eq!(usdc.source, PriceSource::Oracle);
        assert_eq!(usdc.name, "USDC");
    }

    #[test]
    fn test_b_asset_priced_through_exchange_rate() {
        let table = table();
        let book = AssetPriceAggregator::new(&table).build(
            &[],
            &markets(vec![market(100, USDC, B_USDC, MarketType::Standard, 1_020_000)]),
        );

        // 1000 underlying supplied against 500 b assets in circulation.
        let b_usdc = book.get(AssetId::new(B_USDC)).unwrap();
        assert_eq!(b_usdc.price, dec!(2.04));
        assert_eq!(b_usdc.source, PriceSource::Derived);
    }

    #[test]
    fn test_vault_market_has_no_b_asset_price() {
        let table = table();
        let book = AssetPriceAggregator::new(&table).build(
            &[],
            &markets(vec![market(100, ALGO, B_ALGO, MarketType::Vault, 250_000)]),
        );

        assert_eq!(book.get(AssetId::new(ALGO)).unwrap().price, dec!(0.25));
        assert!(book.get(AssetId::new(B_ALGO)).is_none());
    }

    #[test]
    fn test_feed_only_assets_survive() {
        let table = table();
        let book = AssetPriceAggregator::new(&table).build(
            &[feed(999, dec!(3.5)), feed(USDC, dec!(1.00))],
            &BTreeMap::new(),
        );
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(AssetId::new(999)).unwrap().price, dec!(3.5));
        assert_eq!(book.get(AssetId::new(USDC)).unwrap().source, PriceSource::Feed);
    }

    #[test]
    fn test_market_with_unconfigured_asset_is_skipped() {
        let table = table();
        let book = AssetPriceAggregator::new(&table).build(
            &[feed(77, dec!(5))],
            &markets(vec![
                market(100, 77, 78, MarketType::Standard, 9_000_000),
                market(101, USDC, B_USDC, MarketType::Standard, 1_000_000),
            ]),
        );

        assert_eq!(book.get(AssetId::new(77)).unwrap().price, dec!(5));
        assert!(book.get(AssetId::new(78)).is_none());
        assert_eq!(book.get(AssetId::new(USDC)).unwrap().price, dec!(1));
    }

    #[test]
    fn test_shared_underlying_last_market_wins() {
        let table = table();
        let book = AssetPriceAggregator::new(&table).build(
            &[],
            &markets(vec![
                market(200, USDC, B_USDC, MarketType::Standard, 1_010_000),
                market(100, USDC, B_ALGO, MarketType::Stbl, 990_000),
            ]),
        );
        assert_eq!(book.get(AssetId::new(USDC)).unwrap().price, dec!(1.01));
    }

    #[test]
    fn test_overflowing_b_asset_valuation_is_skipped() {
        // Full u64 supply behind a single b asset at a u64::MAX oracle price.
        let raw = market_state(u64::MAX, 1)
            .with_uint("uc", u64::MAX)
            .with_uint("ub", 0)
            .with_uint("ur", 0)
            .with_uint("opsf", 1);
        let table = table();
        let book = AssetPriceAggregator::new(&table).build(
            &[feed(B_USDC, dec!(2))],
            &markets(vec![
                market_with_state(100, USDC, B_USDC, &raw),
                market(101, ALGO, B_ALGO, MarketType::Standard, 250_000),
            ]),
        );

        let usdc = book.get(AssetId::new(USDC)).unwrap();
        assert_eq!(usdc.price, Decimal::from(u64::MAX));
        // the feed entry is kept rather than replaced
        let b_usdc = book.get(AssetId::new(B_USDC)).unwrap();
        assert_eq!(b_usdc.source, PriceSource::Feed);
        assert_eq!(b_usdc.price, dec!(2));
        // later markets still priced
        assert_eq!(book.get(AssetId::new(B_ALGO)).unwrap().source, PriceSource::Derived);
    }
}
