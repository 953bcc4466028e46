//! Program tables and raw states shared by the integration tests.

use algofi_client::{AlgofiClient, NetworkConfig};
use algofi_core::{encode_indexed_key, Address, AppId, AssetConfig, AssetId, AssetTable, RawState};
use algofi_governance::GovernanceConfig;
use algofi_ledger::{MockLedger, MockPriceFeed, PriceRecord};
use algofi_lending::{LendingConfig, MarketConfig, MarketType};
use algofi_staking::{PoolConfig, StakingConfig, REWARDS_SCALE};
use rust_decimal::Decimal;
use std::sync::Arc;

pub const USDC: u64 = 10;
pub const B_USDC: u64 = 11;
pub const ALGO: u64 = 1;
pub const B_ALGO: u64 = 2;
pub const BANK: u64 = 94796780;

pub const USDC_MARKET: u64 = 100;
pub const ALGO_VAULT: u64 = 101;

pub const POOL_A: u64 = 96265422;
pub const POOL_B: u64 = 96284372;
pub const BOOST_APP: u64 = 555;

pub const ADMIN_APP: u64 = 200;
pub const FACTORY_APP: u64 = 250;
pub const ESCROW_APP: u64 = 300;

pub fn network() -> NetworkConfig {
    NetworkConfig {
        assets: AssetTable::new(vec![
            AssetConfig::new(USDC, "USDC", 6),
            AssetConfig::new(B_USDC, "bUSDC", 6),
            AssetConfig::new(ALGO, "ALGO", 6),
            AssetConfig::new(B_ALGO, "bALGO", 6),
            AssetConfig::new(BANK, "BANK", 6),
        ]),
        lending: LendingConfig {
            markets: vec![
                market_config(USDC_MARKET, USDC, B_USDC, MarketType::Standard),
                market_config(ALGO_VAULT, ALGO, B_ALGO, MarketType::Vault),
            ],
        },
        staking: StakingConfig {
            pools: vec![PoolConfig::new(POOL_A, BANK), PoolConfig::new(POOL_B, BANK)],
        },
        governance: Some(GovernanceConfig {
            admin_app_id: AppId::new(ADMIN_APP),
            voting_escrow_app_id: AppId::new(ESCROW_APP),
            governance_token: AssetId::new(BANK),
            min_lock_seconds: 100,
            max_lock_seconds: 1_000,
        }),
    }
}

fn market_config(app: u64, underlying: u64, b_asset: u64, market_type: MarketType) -> MarketConfig {
    MarketConfig {
        name: format!("market-{app}"),
        app_id: AppId::new(app),
        underlying_asset_id: AssetId::new(underlying),
        b_asset_id: AssetId::new(b_asset),
        market_type,
    }
}

/// Market with 1000 underlying supplied against 500 b assets.
pub fn market_state(oracle_price: u64) -> RawState {
    RawState::new()
        .with_uint("uc", 800)
        .with_uint("ub", 300)
        .with_uint("ur", 100)
        .with_uint("bac", 500)
        .with_uint("bsc", 0)
        .with_uint("oai", 7)
        .with_uint("lop", oracle_price)
        .with_uint("lopt", 1_700_000_000)
        .with_uint("opsf", 1_000_000)
}

/// Pool paying `count` rewards programs; program `i` pays asset `1000 + i`.
pub fn pool_state(count: u64) -> RawState {
    let mut raw = RawState::new()
        .with_uint("lt", 1_700_000_000)
        .with_uint("bmai", BOOST_APP)
        .with_uint("ts", 10_000)
        .with_uint("sts", 12_000)
        .with_uint("rmai", 500)
        .with_uint("rpc", count);
    for i in 0..count {
        raw.insert(encode_indexed_key("rpc_", i), 1u64);
        raw.insert(encode_indexed_key("rai_", i), 1_000 + i);
        raw.insert(encode_indexed_key("rps_", i), 5u64);
        raw.insert(
            encode_indexed_key("rc_", i),
            (2 * REWARDS_SCALE).to_be_bytes().to_vec(),
        );
        raw.insert(encode_indexed_key("ri_", i), 0u64);
        raw.insert(encode_indexed_key("rp_", i), 0u64);
    }
    raw
}

/// User position with `unclaimed[i]` pending in program `i` and nothing
/// accrued since the last checkpoint.
pub fn user_pool_state(staked: u64, unclaimed: &[u64]) -> RawState {
    let mut raw = RawState::new()
        .with_uint("uts", staked)
        .with_uint("usts", staked)
        .with_uint("bm", 1);
    for (i, amount) in unclaimed.iter().enumerate() {
        let i = i as u64;
        raw.insert(encode_indexed_key("urpc_", i), 1u64);
        raw.insert(
            encode_indexed_key("urc_", i),
            (2 * REWARDS_SCALE).to_be_bytes().to_vec(),
        );
        raw.insert(encode_indexed_key("uur_", i), *amount);
    }
    raw
}

pub fn escrow_state() -> RawState {
    RawState::new()
        .with_uint("tl", 5_000)
        .with_uint("tv", 4_000)
        .with_uint("ai", BANK)
}

/// Position of 1000 locked from t=100 for 500 seconds.
pub fn user_escrow_state() -> RawState {
    RawState::new()
        .with_uint("ual", 1_000)
        .with_uint("ulst", 100)
        .with_uint("uld", 500)
        .with_uint("uav", 800)
        .with_uint("ubm", 2)
}

pub fn admin_state() -> RawState {
    RawState::new()
        .with_uint("veai", ESCROW_APP)
        .with_uint("pfai", FACTORY_APP)
        .with_uint("qv", 1_000)
        .with_uint("sm", 66)
        .with_uint("pd", 86_400)
        .with_uint("ed", 3_600)
}

pub fn proposal_state(votes_for: u64) -> RawState {
    RawState::new()
        .with_uint("fv", votes_for)
        .with_uint("av", 1)
        .with_uint("vct", 2_000)
        .with_uint("et", 3_000)
        .with_uint("ex", 0)
        .with_uint("cbed", 0)
}

pub fn price(asset_id: u64, price: Decimal) -> PriceRecord {
    PriceRecord {
        asset_id: AssetId::new(asset_id),
        name: "feed".to_string(),
        decimals: 6,
        price,
    }
}

pub fn user() -> Address {
    Address::new([7u8; 32])
}

/// Ledger holding every program of [`network`] in a loadable state.
pub fn ledger() -> Arc<MockLedger> {
    let ledger = Arc::new(MockLedger::new());
    ledger.set_global_state(AppId::new(USDC_MARKET), market_state(1_020_000));
    ledger.set_global_state(AppId::new(ALGO_VAULT), market_state(250_000));
    ledger.set_global_state(AppId::new(POOL_A), pool_state(3));
    ledger.set_global_state(AppId::new(POOL_B), pool_state(1));
    ledger.set_global_state(AppId::new(ESCROW_APP), escrow_state());
    ledger.set_global_state(AppId::new(ADMIN_APP), admin_state());
    ledger.set_created_applications(
        Address::for_application(AppId::new(FACTORY_APP)),
        vec![AppId::new(900)],
    );
    ledger.set_global_state(AppId::new(900), proposal_state(10));
    ledger
}

pub fn client(ledger: &Arc<MockLedger>, feed: Arc<MockPriceFeed>) -> AlgofiClient {
    AlgofiClient::new(ledger.clone(), feed, network())
}
