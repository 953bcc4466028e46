//! The client facade.

use crate::config::{ClientConfig, NetworkConfig};
use crate::error::ClientResult;
use crate::stages::{LoadStage, StageTracker};
use crate::user::AlgofiUser;
use algofi_assets::{AssetBook, AssetPriceAggregator};
use algofi_core::{Address, AssetId};
use algofi_governance::GovernanceClient;
use algofi_ledger::{AlgodClient, AnalyticsClient, DynLedger, DynPriceFeed, PriceRecord};
use algofi_lending::LendingClient;
use algofi_staking::StakingClient;
use algofi_telemetry::Metrics;
use futures_util::future::join_all;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Counts from one `load_state` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub feed_prices: usize,
    pub markets: usize,
    pub pools: usize,
    pub proposals: usize,
    pub assets: usize,
}

/// What a single stage produced.
enum StageOutput {
    Prices(Vec<PriceRecord>),
    Markets(usize),
    Pools(usize),
    Governance,
    Book(AssetBook),
}

/// Entry point of the SDK.
pub struct AlgofiClient {
    ledger: DynLedger,
    price_feed: DynPriceFeed,
    network: Arc<NetworkConfig>,
    lending: LendingClient,
    staking: StakingClient,
    governance: GovernanceClient,
    assets: RwLock<Arc<AssetBook>>,
}

impl AlgofiClient {
    pub fn new(ledger: DynLedger, price_feed: DynPriceFeed, network: NetworkConfig) -> Self {
        let network = Arc::new(network);
        Self {
            lending: LendingClient::new(Arc::clone(&ledger), Arc::new(network.lending.clone())),
            staking: StakingClient::new(Arc::clone(&ledger), Arc::new(network.staking.clone())),
            governance: GovernanceClient::new(
                Arc::clone(&ledger),
                network.governance.clone().map(Arc::new),
            ),
            ledger,
            price_feed,
            network,
            assets: RwLock::new(Arc::new(AssetBook::new())),
        }
    }

    /// Connect to algod and the analytics endpoint named in `config`.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let ledger = AlgodClient::new(config.algod_url(), config.algod_token.clone())?;
        let price_feed = AnalyticsClient::new(config.analytics_url.clone())?;
        Ok(Self::new(
            Arc::new(ledger),
            Arc::new(price_feed),
            config.network_config(),
        ))
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn lending(&self) -> &LendingClient {
        &self.lending
    }

    pub fn staking(&self) -> &StakingClient {
        &self.staking
    }

    pub fn governance(&self) -> &GovernanceClient {
        &self.governance
    }

    /// Asset book published by the last `load_state`.
    pub fn assets(&self) -> Arc<AssetBook> {
        Arc::clone(&self.assets.read())
    }

    pub fn to_usd(&self, asset_id: AssetId, amount: u64) -> Decimal {
        self.assets().to_usd(asset_id, amount)
    }

    /// Load every product line, then price assets.
    ///
    /// Stages run wave by wave as [`LoadStage::waves`] orders them; the
    /// stages of one wave run concurrently. Program and price feed failures
    /// are logged and leave the affected entries out; they never fail the
    /// load.
    pub async fn load_state(&self) -> ClientResult<LoadSummary> {
        let started = Instant::now();
        let tracker = StageTracker::new();
        let mut prices = Vec::new();
        let mut summary = LoadSummary::default();
        let mut book = AssetBook::new();

        for wave in LoadStage::waves() {
            let outputs = join_all(wave.iter().map(|&stage| {
                self.run_stage(&tracker, stage, self.load_stage(stage, &prices))
            }))
            .await;
            for output in outputs {
                match output? {
                    StageOutput::Prices(records) => prices = records,
                    StageOutput::Markets(count) => summary.markets = count,
                    StageOutput::Pools(count) => summary.pools = count,
                    StageOutput::Governance => {
                        summary.proposals = self.governance.snapshot().proposals.len();
                    }
                    StageOutput::Book(built) => book = built,
                }
            }
        }

        summary.feed_prices = prices.len();
        summary.assets = book.len();
        *self.assets.write() = Arc::new(book);

        info!(
            feed_prices = summary.feed_prices,
            markets = summary.markets,
            pools = summary.pools,
            proposals = summary.proposals,
            assets = summary.assets,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Client state loaded"
        );
        Ok(summary)
    }

    /// `prices` holds the feed records once the feed stage has settled.
    async fn load_stage(&self, stage: LoadStage, prices: &[PriceRecord]) -> StageOutput {
        match stage {
            LoadStage::AssetFeed => StageOutput::Prices(self.fetch_prices().await),
            LoadStage::Lending => StageOutput::Markets(self.lending.load_state().await),
            LoadStage::Staking => StageOutput::Pools(self.staking.load_state().await),
            LoadStage::Governance => {
                self.governance.load_state().await;
                StageOutput::Governance
            }
            LoadStage::AssetPricing => {
                let aggregator = AssetPriceAggregator::new(&self.network.assets);
                StageOutput::Book(aggregator.build(prices, &self.lending.markets()))
            }
        }
    }

    async fn run_stage<F: Future>(
        &self,
        tracker: &StageTracker,
        stage: LoadStage,
        work: F,
    ) -> ClientResult<F::Output> {
        tracker.begin(stage)?;
        let started = Instant::now();
        let output = work.await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        Metrics::load_duration(stage.as_str(), elapsed_ms);
        debug!(%stage, elapsed_ms, "Load stage settled");
        tracker.settle(stage);
        Ok(output)
    }

    async fn fetch_prices(&self) -> Vec<PriceRecord> {
        match self.price_feed.fetch_prices().await {
            Ok(prices) => prices,
            Err(error) => {
                warn!(%error, "Price feed unavailable, continuing with on-chain prices only");
                Metrics::price_feed_failed();
                Vec::new()
            }
        }
    }

    /// Read the user's local states once and decode every product line.
    pub async fn get_user(&self, address: Address) -> ClientResult<AlgofiUser> {
        let locals = self.ledger.local_states(address).await?;

        let staking = async { self.staking.user_from_local_states(address, &locals) };
        let governance = async {
            if self.network.governance.is_none() {
                return Ok(None);
            }
            self.governance
                .user_from_local_states(address, &locals)
                .await
                .map(Some)
        };
        let (staking, governance) = tokio::join!(staking, governance);

        Ok(AlgofiUser {
            address,
            staking,
            governance: governance?,
        })
    }
}
