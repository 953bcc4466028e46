//! In-memory ledger and price feed for tests and offline tooling.

use crate::analytics::{PriceFeed, PriceRecord};
use crate::client::{BoxFuture, LedgerClient, LocalStates};
use crate::error::{LedgerError, LedgerResult};
use algofi_core::{Address, AppId, RawState};
use algofi_txn::SuggestedParams;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Mock ledger holding global and local states in memory.
///
/// Reads can be delayed or made to fail per application, and every global
/// read is recorded in completion order.
#[derive(Debug)]
pub struct MockLedger {
    globals: RwLock<HashMap<AppId, RawState>>,
    locals: RwLock<HashMap<Address, LocalStates>>,
    created: RwLock<HashMap<Address, Vec<AppId>>>,
    params: RwLock<SuggestedParams>,
    failing: RwLock<HashSet<AppId>>,
    delays: RwLock<HashMap<AppId, Duration>>,
    global_reads: Mutex<Vec<AppId>>,
    local_reads: Mutex<Vec<Address>>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            globals: RwLock::new(HashMap::new()),
            locals: RwLock::new(HashMap::new()),
            created: RwLock::new(HashMap::new()),
            params: RwLock::new(SuggestedParams::from_last_round(
                1_000,
                1_000,
                "mock-v1.0",
                [0u8; 32],
            )),
            failing: RwLock::new(HashSet::new()),
            delays: RwLock::new(HashMap::new()),
            global_reads: Mutex::new(Vec::new()),
            local_reads: Mutex::new(Vec::new()),
        }
    }

    pub fn set_global_state(&self, app_id: AppId, state: RawState) {
        self.globals.write().insert(app_id, state);
    }

    pub fn set_local_state(&self, address: Address, app_id: AppId, state: RawState) {
        self.locals
            .write()
            .entry(address)
            .or_default()
            .insert(app_id, state);
    }

    pub fn set_created_applications(&self, creator: Address, apps: Vec<AppId>) {
        self.created.write().insert(creator, apps);
    }

    pub fn set_params(&self, params: SuggestedParams) {
        *self.params.write() = params;
    }

    /// Make every global read of `app_id` fail.
    pub fn fail_app(&self, app_id: AppId) {
        self.failing.write().insert(app_id);
    }

    /// Delay every global read of `app_id`.
    pub fn set_delay(&self, app_id: AppId, delay: Duration) {
        self.delays.write().insert(app_id, delay);
    }

    /// Global reads in completion order.
    pub fn global_reads(&self) -> Vec<AppId> {
        self.global_reads.lock().clone()
    }

    /// Number of local-state reads per address.
    pub fn local_read_count(&self, address: &Address) -> usize {
        self.local_reads
            .lock()
            .iter()
            .filter(|a| *a == address)
            .count()
    }

    async fn read_global(&self, app_id: AppId) -> LedgerResult<RawState> {
        let delay = self.delays.read().get(&app_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.global_reads.lock().push(app_id);

        if self.failing.read().contains(&app_id) {
            return Err(LedgerError::Status {
                status: 500,
                body: format!("injected failure for application {app_id}"),
            });
        }
        self.globals
            .read()
            .get(&app_id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("application {app_id}")))
    }

    async fn read_locals(&self, address: Address) -> LedgerResult<LocalStates> {
        self.local_reads.lock().push(address);
        Ok(self
            .locals
            .read()
            .get(&address)
            .cloned()
            .unwrap_or_default())
    }
}

impl LedgerClient for MockLedger {
    fn global_state(&self, app_id: AppId) -> BoxFuture<'_, LedgerResult<RawState>> {
        Box::pin(self.read_global(app_id))
    }

    fn local_states(&self, address: Address) -> BoxFuture<'_, LedgerResult<LocalStates>> {
        Box::pin(self.read_locals(address))
    }

    fn created_applications(&self, address: Address) -> BoxFuture<'_, LedgerResult<Vec<AppId>>> {
        Box::pin(async move {
            Ok(self
                .created
                .read()
                .get(&address)
                .cloned()
                .unwrap_or_default())
        })
    }

    fn suggested_params(&self) -> BoxFuture<'_, LedgerResult<SuggestedParams>> {
        Box::pin(async move { Ok(self.params.read().clone()) })
    }
}

/// Mock price feed returning a fixed list, or failing.
#[derive(Debug)]
pub struct MockPriceFeed {
    prices: RwLock<Option<Vec<PriceRecord>>>,
    delay: RwLock<Option<Duration>>,
}

impl MockPriceFeed {
    /// Feed that returns `prices`.
    pub fn new(prices: Vec<PriceRecord>) -> Self {
        Self {
            prices: RwLock::new(Some(prices)),
            delay: RwLock::new(None),
        }
    }

    /// Feed that always fails.
    pub fn unavailable() -> Self {
        Self {
            prices: RwLock::new(None),
            delay: RwLock::new(None),
        }
    }

    pub fn set_prices(&self, prices: Option<Vec<PriceRecord>>) {
        *self.prices.write() = prices;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write() = Some(delay);
    }

    async fn fetch(&self) -> LedgerResult<Vec<PriceRecord>> {
        let delay = *self.delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.prices
            .read()
            .clone()
            .ok_or_else(|| LedgerError::PriceFeedUnavailable("mock feed offline".to_string()))
    }
}

impl PriceFeed for MockPriceFeed {
    fn fetch_prices(&self) -> BoxFuture<'_, LedgerResult<Vec<PriceRecord>>> {
        Box::pin(self.fetch())
    }
}
