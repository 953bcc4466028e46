//! External asset price feed.

use crate::client::BoxFuture;
use crate::error::{LedgerError, LedgerResult};
use algofi_core::AssetId;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One asset as reported by the analytics service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub asset_id: AssetId,
    pub name: String,
    pub decimals: u8,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
struct AssetsBody {
    assets: Vec<PriceRecord>,
}

#[derive(Debug, Deserialize)]
struct AssetsResponse {
    body: AssetsBody,
}

/// Source of externally quoted asset prices.
pub trait PriceFeed: Send + Sync {
    /// Fetch the current price list. Any failure is reported as
    /// [`LedgerError::PriceFeedUnavailable`].
    fn fetch_prices(&self) -> BoxFuture<'_, LedgerResult<Vec<PriceRecord>>>;
}

/// Arc wrapper for PriceFeed trait objects.
pub type DynPriceFeed = Arc<dyn PriceFeed>;

/// Price feed backed by the analytics REST endpoint (`GET {base}/assets`).
pub struct AnalyticsClient {
    client: Client,
    assets_url: String,
}

impl AnalyticsClient {
    pub fn new(base_url: impl Into<String>) -> LedgerResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::Http(format!("Failed to create HTTP client: {e}")))?;

        let base_url = base_url.into();
        Ok(Self {
            client,
            assets_url: format!("{}/assets", base_url.trim_end_matches('/')),
        })
    }

    async fn fetch(&self) -> LedgerResult<Vec<PriceRecord>> {
        info!(url = %self.assets_url, "Fetching asset prices");

        let response = self
            .client
            .get(&self.assets_url)
            .send()
            .await
            .map_err(|e| LedgerError::PriceFeedUnavailable(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::PriceFeedUnavailable(format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LedgerError::PriceFeedUnavailable(format!("Failed to read body: {e}")))?;
        let records = parse_assets(&text)?;
        debug!(count = records.len(), "Asset prices received");
        Ok(records)
    }
}

fn parse_assets(text: &str) -> LedgerResult<Vec<PriceRecord>> {
    serde_json::from_str::<AssetsResponse>(text)
        .map(|response| response.body.assets)
        .map_err(|e| LedgerError::PriceFeedUnavailable(format!("Malformed body: {e}")))
}

impl PriceFeed for AnalyticsClient {
    fn fetch_prices(&self) -> BoxFuture<'_, LedgerResult<Vec<PriceRecord>>> {
        Box::pin(self.fetch())
    }
}
