//! Lending market registry.

use crate::config::LendingConfig;
use crate::error::{LendingError, LendingResult};
use crate::market::Market;
use algofi_core::AppId;
use algofi_ledger::{load_programs, DynLedger, ProgramRegistry};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Product label for logs and metrics.
const PRODUCT: &str = "lending";

/// Loads and holds every configured lending market.
pub struct LendingClient {
    ledger: DynLedger,
    config: Arc<LendingConfig>,
    markets: ProgramRegistry<Market>,
}

impl LendingClient {
    pub fn new(ledger: DynLedger, config: Arc<LendingConfig>) -> Self {
        Self {
            ledger,
            config,
            markets: ProgramRegistry::new(),
        }
    }

    pub fn config(&self) -> &LendingConfig {
        &self.config
    }

    /// Load every configured market and publish the successful ones.
    ///
    /// Returns the number of markets loaded.
    pub async fn load_state(&self) -> usize {
        let config = Arc::clone(&self.config);
        let markets = load_programs(
            self.ledger.as_ref(),
            PRODUCT,
            config.markets.iter().map(|m| m.app_id),
            |app_id, raw| -> LendingResult<Market> {
                let market_config = config
                    .market(app_id)
                    .ok_or(LendingError::UnknownMarket(app_id))?;
                Ok(Market::from_state(market_config.clone(), raw)?)
            },
        )
        .await;

        let loaded = markets.len();
        info!(
            loaded,
            configured = self.config.markets.len(),
            "Lending markets loaded"
        );
        self.markets.publish(markets);
        loaded
    }

    /// Snapshot of the loaded markets.
    pub fn markets(&self) -> Arc<BTreeMap<AppId, Market>> {
        self.markets.snapshot()
    }

    pub fn market(&self, app_id: AppId) -> LendingResult<Market> {
        self.markets
            .get(app_id)
            .ok_or(LendingError::MarketNotLoaded(app_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MarketConfig, MarketType};
    use algofi_core::{AssetId, RawState};
    use algofi_ledger::MockLedger;

    fn market_config(app_id: u64, asset: u64) -> MarketConfig {
        MarketConfig {
            name: format!("market-{app_id}"),
            app_id: AppId::new(app_id),
            underlying_asset_id: AssetId::new(asset),
            b_asset_id: AssetId::new(asset + 1),
            market_type: MarketType::Standard,
        }
    }

    fn market_state() -> RawState {
        RawState::new()
            .with_uint("uc", 1_000)
            .with_uint("ub", 0)
            .with_uint("ur", 0)
            .with_uint("bac", 1_000)
            .with_uint("bsc", 0)
            .with_uint("oai", 1)
            .with_uint("lop", 1_000_000)
            .with_uint("lopt", 0)
            .with_uint("opsf", 1_000_000)
    }

    #[tokio::test]
    async fn test_load_state_isolates_bad_market() {
        let ledger = Arc::new(MockLedger::new());
        ledger.set_global_state(AppId::new(1), market_state());
        ledger.set_global_state(AppId::new(2), RawState::new().with_uint("uc", 5));
        ledger.set_global_state(AppId::new(3), market_state());

        let config = LendingConfig {
            markets: vec![
                market_config(1, 10),
                market_config(2, 20),
                market_config(3, 30),
            ],
        };
        let client = LendingClient::new(ledger, Arc::new(config));

        assert_eq!(client.load_state().await, 2);
        assert!(client.market(AppId::new(1)).is_ok());
        assert!(matches!(
            client.market(AppId::new(2)),
            Err(LendingError::MarketNotLoaded(_))
        ));
        assert_eq!(client.markets().len(), 2);
    }

    #[tokio::test]
    async fn test_reload_replaces_snapshot() {
        let ledger = Arc::new(MockLedger::new());
        ledger.set_global_state(AppId::new(1), market_state());
        let config = LendingConfig {
            markets: vec![market_config(1, 10)],
        };
        let client = LendingClient::new(ledger.clone(), Arc::new(config));
        client.load_state().await;
        let before = client.markets();

        ledger.set_global_state(AppId::new(1), market_state().with_uint("uc", 2_000));
        client.load_state().await;

        assert_eq!(before[&AppId::new(1)].state.underlying_cash, 1_000);
        assert_eq!(client.market(AppId::new(1)).unwrap().state.underlying_cash, 2_000);
    }
}
