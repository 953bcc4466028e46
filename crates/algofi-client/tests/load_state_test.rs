//! Load ordering, isolation and pricing through the client facade.

mod integration;
use integration::common::fixtures::*;

use algofi_assets::PriceSource;
use algofi_core::{encode_indexed_key, AppId, AssetId};
use algofi_ledger::MockPriceFeed;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

/// Pricing must see the market even when its read is the slowest load.
#[tokio::test]
async fn test_pricing_runs_after_delayed_lending_load() {
    let ledger = ledger();
    ledger.set_delay(AppId::new(USDC_MARKET), Duration::from_millis(150));
    let client = client(&ledger, Arc::new(MockPriceFeed::new(vec![price(USDC, dec!(1.00))])));

    let summary = client.load_state().await.unwrap();

    assert_eq!(summary.markets, 2);
    assert_eq!(ledger.global_reads().last(), Some(&AppId::new(USDC_MARKET)));
    let assets = client.assets();
    let usdc = assets.get(AssetId::new(USDC)).unwrap();
    assert_eq!(usdc.price, dec!(1.02));
    assert_eq!(usdc.source, PriceSource::Oracle);
    assert_eq!(assets.get(AssetId::new(B_USDC)).unwrap().price, dec!(2.04));
}

#[tokio::test]
async fn test_slow_price_feed_still_precedes_pricing() {
    let ledger = ledger();
    let feed = Arc::new(MockPriceFeed::new(vec![price(BANK, dec!(0.5))]));
    feed.set_delay(Duration::from_millis(100));
    let client = client(&ledger, feed);

    let summary = client.load_state().await.unwrap();
    assert_eq!(summary.feed_prices, 1);
    assert_eq!(client.to_usd(AssetId::new(BANK), 4_000_000), dec!(2));
}

#[tokio::test]
async fn test_vault_market_contributes_no_b_asset_price() {
    let ledger = ledger();
    let client = client(&ledger, Arc::new(MockPriceFeed::new(Vec::new())));
    client.load_state().await.unwrap();

    let assets = client.assets();
    assert_eq!(assets.get(AssetId::new(ALGO)).unwrap().price, dec!(0.25));
    assert!(assets.get(AssetId::new(B_ALGO)).is_none());
    assert_eq!(client.to_usd(AssetId::new(B_ALGO), 1_000_000), Decimal::ZERO);
}

#[tokio::test]
async fn test_price_feed_outage_keeps_onchain_prices() {
    let ledger = ledger();
    let client = client(&ledger, Arc::new(MockPriceFeed::unavailable()));
    let summary = client.load_state().await.unwrap();

    assert_eq!(summary.feed_prices, 0);
    assert_eq!(client.to_usd(AssetId::new(USDC), 2_000_000), dec!(2.04));
    assert_eq!(client.to_usd(AssetId::new(BANK), 1_000_000), Decimal::ZERO);
}

#[tokio::test]
async fn test_extreme_oracle_price_does_not_abort_load() {
    let ledger = ledger();
    ledger.set_global_state(
        AppId::new(USDC_MARKET),
        market_state(u64::MAX)
            .with_uint("uc", u64::MAX)
            .with_uint("ub", 0)
            .with_uint("ur", 0)
            .with_uint("bac", 1)
            .with_uint("opsf", 1),
    );
    let feed = Arc::new(MockPriceFeed::new(vec![price(USDC, dec!(1.00))]));
    let client = client(&ledger, feed);

    let summary = client.load_state().await.unwrap();

    assert_eq!(summary.markets, 2);
    let assets = client.assets();
    assert_eq!(assets.get(AssetId::new(USDC)).unwrap().price, Decimal::from(u64::MAX));
    assert!(assets.get(AssetId::new(B_USDC)).is_none());
    // valuing the whole supply overflows and reads as zero
    assert_eq!(client.to_usd(AssetId::new(USDC), u64::MAX), Decimal::ZERO);
    assert_eq!(client.to_usd(AssetId::new(ALGO), 4_000_000), dec!(1));
}

#[tokio::test]
async fn test_three_rewards_programs_loaded() {
    let ledger = ledger();
    let client = client(&ledger, Arc::new(MockPriceFeed::new(Vec::new())));
    client.load_state().await.unwrap();

    let pool = client.staking().pool(AppId::new(POOL_A)).unwrap();
    let programs = pool.rewards_programs().unwrap();
    let indices: Vec<u64> = programs.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_missing_index_field_withholds_whole_family() {
    let ledger = ledger();
    let mut raw = pool_state(3);
    raw.remove(&encode_indexed_key("rps_", 1));
    ledger.set_global_state(AppId::new(POOL_A), raw);
    let client = client(&ledger, Arc::new(MockPriceFeed::new(Vec::new())));

    let summary = client.load_state().await.unwrap();

    assert_eq!(summary.pools, 2);
    let pool = client.staking().pool(AppId::new(POOL_A)).unwrap();
    assert!(pool.rewards_programs().is_none());
    assert!(pool.rewards_program(0).is_none());
    assert!(pool.rewards_program(2).is_none());
}

#[tokio::test]
async fn test_failed_programs_are_isolated() {
    let ledger = ledger();
    ledger.fail_app(AppId::new(POOL_B));
    ledger.set_global_state(AppId::new(ALGO_VAULT), market_state(1).with_uint("opsf", 0));
    let client = client(&ledger, Arc::new(MockPriceFeed::new(vec![price(ALGO, dec!(0.2))])));

    let summary = client.load_state().await.unwrap();

    assert_eq!(summary.markets, 1);
    assert_eq!(summary.pools, 1);
    assert!(client.staking().pool(AppId::new(POOL_B)).is_err());
    assert!(client.lending().market(AppId::new(ALGO_VAULT)).is_err());
    // The failed market leaves the feed price in place.
    assert_eq!(client.to_usd(AssetId::new(ALGO), 1_000_000), dec!(0.2));
}

#[tokio::test]
async fn test_governance_loaded_with_proposals() {
    let ledger = ledger();
    let client = client(&ledger, Arc::new(MockPriceFeed::new(Vec::new())));
    let summary = client.load_state().await.unwrap();

    assert_eq!(summary.proposals, 1);
    let escrow = client.governance().voting_escrow().unwrap();
    assert_eq!(escrow.total_locked, 5_000);
}

#[tokio::test]
async fn test_get_user_reads_local_states_once() {
    let ledger = ledger();
    let client = client(&ledger, Arc::new(MockPriceFeed::new(vec![price(BANK, dec!(0.5))])));
    client.load_state().await.unwrap();

    let user = user();
    ledger.set_local_state(user, AppId::new(POOL_A), user_pool_state(2_000_000, &[0, 0, 0]));
    ledger.set_local_state(user, AppId::new(ESCROW_APP), user_escrow_state());

    let state = client.get_user(user).await.unwrap();

    assert_eq!(ledger.local_read_count(&user), 1);
    assert!(state.staking.is_opted_in(AppId::new(POOL_A)));
    assert!(!state.staking.is_opted_in(AppId::new(POOL_B)));
    let governance = state.governance.as_ref().unwrap();
    assert_eq!(governance.voting_escrow.as_ref().unwrap().lock_end_time(), 600);
    assert!(governance.admin.is_none());
    assert_eq!(
        state.staked_usd(&client.network().staking, &client.assets()),
        Some(dec!(1))
    );
}
