//! Algod REST adapter.
//!
//! Reads application global state, account local state, created
//! applications and suggested params from an algod node. Keys and byte
//! values arrive base64-encoded.

use crate::client::{BoxFuture, LedgerClient, LocalStates};
use crate::error::{LedgerError, LedgerResult};
use algofi_core::{Address, AppId, RawState, StateValue};
use algofi_txn::SuggestedParams;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the node API token.
const API_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Value type tag for byte strings in algod's teal value encoding.
const TEAL_BYTES: u8 = 1;
/// Value type tag for integers.
const TEAL_UINT: u8 = 2;

#[derive(Debug, Deserialize)]
struct TealValue {
    #[serde(rename = "type")]
    value_type: u8,
    #[serde(default)]
    bytes: String,
    #[serde(default)]
    uint: u64,
}

#[derive(Debug, Deserialize)]
struct TealKeyValue {
    key: String,
    value: TealValue,
}

#[derive(Debug, Deserialize)]
struct ApplicationParams {
    #[serde(rename = "global-state", default)]
    global_state: Vec<TealKeyValue>,
}

#[derive(Debug, Deserialize)]
struct ApplicationResponse {
    params: ApplicationParams,
}

#[derive(Debug, Deserialize)]
struct AppLocalState {
    id: u64,
    #[serde(rename = "key-value", default)]
    key_value: Vec<TealKeyValue>,
}

#[derive(Debug, Deserialize)]
struct CreatedApp {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(rename = "apps-local-state", default)]
    apps_local_state: Vec<AppLocalState>,
    #[serde(rename = "created-apps", default)]
    created_apps: Vec<CreatedApp>,
}

#[derive(Debug, Deserialize)]
struct ParamsResponse {
    #[serde(rename = "genesis-hash")]
    genesis_hash: String,
    #[serde(rename = "genesis-id")]
    genesis_id: String,
    #[serde(rename = "last-round")]
    last_round: u64,
    #[serde(rename = "min-fee")]
    min_fee: u64,
}

fn decode_base64(field: &str, text: &str) -> LedgerResult<Vec<u8>> {
    BASE64
        .decode(text)
        .map_err(|e| LedgerError::Parse(format!("Invalid base64 in {field}: {e}")))
}

fn to_raw_state(entries: Vec<TealKeyValue>) -> LedgerResult<RawState> {
    let mut state = RawState::new();
    for entry in entries {
        let key = decode_base64("key", &entry.key)?;
        let value = match entry.value.value_type {
            TEAL_BYTES => StateValue::Bytes(decode_base64("value", &entry.value.bytes)?),
            TEAL_UINT => StateValue::Uint(entry.value.uint),
            other => {
                return Err(LedgerError::Parse(format!("Unknown teal value type {other}")));
            }
        };
        state.insert(key, value);
    }
    Ok(state)
}

fn to_params(response: ParamsResponse) -> LedgerResult<SuggestedParams> {
    let hash = decode_base64("genesis-hash", &response.genesis_hash)?;
    let genesis_hash: [u8; 32] = hash
        .as_slice()
        .try_into()
        .map_err(|_| LedgerError::Parse(format!("Genesis hash has {} bytes", hash.len())))?;
    Ok(SuggestedParams::from_last_round(
        response.last_round,
        response.min_fee,
        response.genesis_id,
        genesis_hash,
    ))
}

/// Ledger client backed by an algod node.
pub struct AlgodClient {
    client: Client,
    base_url: String,
    token: String,
}

impl AlgodClient {
    /// Create a new algod client.
    ///
    /// # Arguments
    /// * `base_url` - node URL (e.g., "https://node.testnet.algoexplorerapi.io")
    /// * `token` - API token, empty for public nodes
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> LedgerResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> LedgerResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "algod request");

        let mut request = self.client.get(&url);
        if !self.token.is_empty() {
            request = request.header(API_TOKEN_HEADER, &self.token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| LedgerError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LedgerError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| LedgerError::Parse(format!("Failed to parse response: {e}")))
    }

    async fn account(&self, address: Address) -> LedgerResult<AccountResponse> {
        self.get_json(&format!("/v2/accounts/{address}")).await
    }

    async fn fetch_global_state(&self, app_id: AppId) -> LedgerResult<RawState> {
        let response: ApplicationResponse =
            self.get_json(&format!("/v2/applications/{app_id}")).await?;
        to_raw_state(response.params.global_state)
    }

    async fn fetch_local_states(&self, address: Address) -> LedgerResult<LocalStates> {
        let account = self.account(address).await?;
        account
            .apps_local_state
            .into_iter()
            .map(|app| Ok((AppId::new(app.id), to_raw_state(app.key_value)?)))
            .collect()
    }

    async fn fetch_created_applications(&self, address: Address) -> LedgerResult<Vec<AppId>> {
        let account = self.account(address).await?;
        Ok(account
            .created_apps
            .into_iter()
            .map(|app| AppId::new(app.id))
            .collect())
    }

    async fn fetch_params(&self) -> LedgerResult<SuggestedParams> {
        let response: ParamsResponse = self.get_json("/v2/transactions/params").await?;
        to_params(response)
    }
}

impl LedgerClient for AlgodClient {
    fn global_state(&self, app_id: AppId) -> BoxFuture<'_, LedgerResult<RawState>> {
        Box::pin(self.fetch_global_state(app_id))
    }

    fn local_states(&self, address: Address) -> BoxFuture<'_, LedgerResult<LocalStates>> {
        Box::pin(self.fetch_local_states(address))
    }

    fn created_applications(&self, address: Address) -> BoxFuture<'_, LedgerResult<Vec<AppId>>> {
        Box::pin(self.fetch_created_applications(address))
    }

    fn suggested_params(&self) -> BoxFuture<'_, LedgerResult<SuggestedParams>> {
        Box::pin(self.fetch_params())
    }
}
