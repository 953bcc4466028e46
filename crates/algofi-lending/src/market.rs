//! Lending market state.
//!
//! A market holds one underlying asset and mints a b asset against
//! deposits. Its global state carries the pool balances and the latest
//! oracle price the program itself uses for valuation.
//!
//! The global state keys below match the deployed market programs this
//! client has been exercised against. They are not a published wire
//! contract: a redeployed program may rename them, in which case decoding
//! fails with a missing key rather than yielding wrong numbers.

use crate::config::{MarketConfig, MarketType};
use algofi_core::{
    from_base_units, Address, AppId, AssetId, DecodeError, DecodeResult, FieldSpec, RawState,
    Record, Schema, StateRecord,
};
use rust_decimal::Decimal;

const MARKET_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("underlying_cash", "uc"),
    FieldSpec::uint("underlying_borrowed", "ub"),
    FieldSpec::uint("underlying_reserves", "ur"),
    FieldSpec::uint("b_asset_circulation", "bac"),
    FieldSpec::uint("borrow_share_circulation", "bsc"),
    FieldSpec::uint("oracle_app_id", "oai"),
    FieldSpec::uint("latest_oracle_price", "lop"),
    FieldSpec::uint("latest_oracle_price_time", "lopt"),
    FieldSpec::uint("oracle_price_scale_factor", "opsf"),
];

/// Global state schema of a lending market.
pub const MARKET_SCHEMA: Schema = Schema::new("market", MARKET_FIELDS);

/// Oracle price as cached in the market's own state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oracle {
    pub app_id: AppId,
    pub raw_price: u64,
    pub scale_factor: u64,
    pub latest_update: u64,
}

impl Oracle {
    /// USD price of one whole underlying token.
    pub fn price(&self) -> Decimal {
        Decimal::from(self.raw_price) / Decimal::from(self.scale_factor)
    }
}

/// Decoded market global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketState {
    pub underlying_cash: u64,
    pub underlying_borrowed: u64,
    pub underlying_reserves: u64,
    pub b_asset_circulation: u64,
    pub borrow_share_circulation: u64,
    pub oracle: Oracle,
}

impl StateRecord for MarketState {
    const SCHEMA: &'static Schema = &MARKET_SCHEMA;

    fn from_record(record: &Record) -> DecodeResult<Self> {
        let scale_factor = record.uint("oracle_price_scale_factor")?;
        if scale_factor == 0 {
            return Err(DecodeError::InvalidValue {
                field: "oracle_price_scale_factor",
                reason: "zero scale factor".to_string(),
            });
        }
        Ok(Self {
            underlying_cash: record.uint("underlying_cash")?,
            underlying_borrowed: record.uint("underlying_borrowed")?,
            underlying_reserves: record.uint("underlying_reserves")?,
            b_asset_circulation: record.uint("b_asset_circulation")?,
            borrow_share_circulation: record.uint("borrow_share_circulation")?,
            oracle: Oracle {
                app_id: AppId::new(record.uint("oracle_app_id")?),
                raw_price: record.uint("latest_oracle_price")?,
                scale_factor,
                latest_update: record.uint("latest_oracle_price_time")?,
            },
        })
    }
}

/// An amount of underlying with its USD value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetAmount {
    pub underlying: u64,
    pub usd: Decimal,
}

/// A loaded lending market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    pub config: MarketConfig,
    pub address: Address,
    pub state: MarketState,
}

impl Market {
    pub fn from_state(config: MarketConfig, raw: &RawState) -> DecodeResult<Self> {
        let state = MarketState::decode_state(raw)?;
        Ok(Self {
            address: Address::for_application(config.app_id),
            config,
            state,
        })
    }

    pub fn app_id(&self) -> AppId {
        self.config.app_id
    }

    pub fn market_type(&self) -> MarketType {
        self.config.market_type
    }

    pub fn underlying_asset_id(&self) -> AssetId {
        self.config.underlying_asset_id
    }

    pub fn b_asset_id(&self) -> AssetId {
        self.config.b_asset_id
    }

    pub fn oracle(&self) -> &Oracle {
        &self.state.oracle
    }

    /// Underlying owned by depositors: cash plus borrowed, less reserves.
    pub fn underlying_supplied(&self) -> u64 {
        let s = &self.state;
        s.underlying_cash
            .saturating_add(s.underlying_borrowed)
            .saturating_sub(s.underlying_reserves)
    }

    /// Underlying base units redeemable for `b_amount` b-asset base units.
    ///
    /// Rounds down. A market with no b assets in circulation converts 1:1.
    pub fn b_asset_to_underlying(&self, b_amount: u64) -> u64 {
        let circulation = self.state.b_asset_circulation;
        if circulation == 0 {
            return b_amount;
        }
        let underlying =
            u128::from(b_amount) * u128::from(self.underlying_supplied()) / u128::from(circulation);
        u64::try_from(underlying).unwrap_or(u64::MAX)
    }

    /// USD value of `amount` underlying base units at the oracle price.
    ///
    /// `None` when the product does not fit a `Decimal`, which a corrupt or
    /// hostile oracle price can cause.
    pub fn underlying_to_usd(&self, amount: u64, underlying_decimals: u8) -> Option<Decimal> {
        from_base_units(amount, underlying_decimals).checked_mul(self.oracle().price())
    }

    /// Convert b-asset base units to underlying and value them.
    pub fn b_asset_to_asset_amount(
        &self,
        b_amount: u64,
        underlying_decimals: u8,
    ) -> Option<AssetAmount> {
        let underlying = self.b_asset_to_underlying(b_amount);
        Some(AssetAmount {
            underlying,
            usd: self.underlying_to_usd(underlying, underlying_decimals)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market_state(cash: u64, borrowed: u64, reserves: u64, bac: u64) -> RawState {
        RawState::new()
            .with_uint("uc", cash)
            .with_uint("ub", borrowed)
            .with_uint("ur", reserves)
            .with_uint("bac", bac)
            .with_uint("bsc", 0)
            .with_uint("oai", 531724540)
            .with_uint("lop", 1_020_000)
            .with_uint("lopt", 1_700_000_000)
            .with_uint("opsf", 1_000_000)
    }

    fn config() -> MarketConfig {
        MarketConfig {
            name: "USDC".to_string(),
            app_id: AppId::new(100),
            underlying_asset_id: AssetId::new(10),
            b_asset_id: AssetId::new(11),
            market_type: MarketType::Standard,
        }
    }

    #[test]
    fn test_decode_market() {
        let market = Market::from_state(config(), &market_state(800, 300, 100, 500)).unwrap();
        assert_eq!(market.oracle().price(), dec!(1.02));
        assert_eq!(market.underlying_supplied(), 1_000);
        assert_eq!(market.address, Address::for_application(AppId::new(100)));
    }

    #[test]
    fn test_missing_field_fails() {
        let mut raw = market_state(1, 1, 0, 1);
        raw.remove(b"lop");
        assert_eq!(
            Market::from_state(config(), &raw),
            Err(DecodeError::MissingKey {
                key: "lop".to_string()
            })
        );
    }

    #[test]
    fn test_zero_scale_factor_rejected() {
        let raw = market_state(1, 1, 0, 1).with_uint("opsf", 0);
        assert!(matches!(
            Market::from_state(config(), &raw),
            Err(DecodeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_b_asset_conversion() {
        // 1000 underlying backing 500 b assets: 1 b = 2 underlying
        let market = Market::from_state(config(), &market_state(800, 300, 100, 500)).unwrap();
        assert_eq!(market.b_asset_to_underlying(1_000_000), 2_000_000);

        let amount = market.b_asset_to_asset_amount(1_000_000, 6).unwrap();
        assert_eq!(amount.underlying, 2_000_000);
        assert_eq!(amount.usd, dec!(2.04));
    }

    #[test]
    fn test_empty_market_converts_one_to_one() {
        let market = Market::from_state(config(), &market_state(0, 0, 0, 0)).unwrap();
        assert_eq!(market.b_asset_to_underlying(42), 42);
    }

    #[test]
    fn test_conversion_saturates_at_u64_max() {
        // u64::MAX underlying backing a single b asset
        let market = Market::from_state(config(), &market_state(u64::MAX, 0, 0, 1)).unwrap();
        assert_eq!(market.b_asset_to_underlying(2), u64::MAX);
    }

    #[test]
    fn test_extreme_oracle_price_does_not_overflow() {
        let raw = market_state(u64::MAX, 0, 0, 1)
            .with_uint("lop", u64::MAX)
            .with_uint("opsf", 1);
        let market = Market::from_state(config(), &raw).unwrap();

        assert_eq!(market.underlying_to_usd(u64::MAX, 0), None);
        assert_eq!(market.b_asset_to_asset_amount(1, 0), None);
        // small amounts still value fine at the same price
        assert_eq!(market.underlying_to_usd(1, 0), Some(Decimal::from(u64::MAX)));
    }
}
