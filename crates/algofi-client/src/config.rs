//! Client configuration.

use crate::error::{ClientError, ClientResult};
use algofi_core::{AssetConfig, AssetTable, Network};
use algofi_governance::GovernanceConfig;
use algofi_lending::LendingConfig;
use algofi_staking::{PoolConfig, StakingConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "ALGOFI_CONFIG";

/// Staked asset of the testnet staking pools.
const TESTNET_STAKED_ASSET: u64 = 94796780;

/// Testnet staking pools.
const TESTNET_STAKING_POOLS: [u64; 4] = [96265422, 96284372, 96284474, 96284557];

/// Program and asset ids of one network.
///
/// Immutable once built; shared by `Arc` with every product client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub assets: AssetTable,
    #[serde(default)]
    pub lending: LendingConfig,
    #[serde(default)]
    pub staking: StakingConfig,
    /// Absent on networks without governance programs.
    #[serde(default)]
    pub governance: Option<GovernanceConfig>,
}

impl NetworkConfig {
    /// Built-in tables. Mainnet programs are not launched yet, so its table
    /// is empty and must be supplied through the configuration file.
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::default(),
            Network::Testnet => Self {
                assets: AssetTable::new(vec![AssetConfig::new(TESTNET_STAKED_ASSET, "BANK", 6)]),
                lending: LendingConfig::default(),
                staking: StakingConfig {
                    pools: TESTNET_STAKING_POOLS
                        .into_iter()
                        .map(|app_id| PoolConfig::new(app_id, TESTNET_STAKED_ASSET))
                        .collect(),
                },
                governance: None,
            },
        }
    }
}

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub network: Network,
    /// Defaults to the network's public endpoint.
    #[serde(default)]
    pub algod_url: Option<String>,
    #[serde(default)]
    pub algod_token: String,
    #[serde(default = "default_analytics_url")]
    pub analytics_url: String,
    /// Replaces the built-in tables of `network` when present.
    #[serde(default)]
    pub programs: Option<NetworkConfig>,
}

fn default_analytics_url() -> String {
    "https://api.algofi.org".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            algod_url: None,
            algod_token: String::new(),
            analytics_url: default_analytics_url(),
            programs: None,
        }
    }
}

impl ClientConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    pub fn algod_url(&self) -> &str {
        match (&self.algod_url, self.network) {
            (Some(url), _) => url.as_str(),
            (None, Network::Mainnet) => "https://mainnet-api.algonode.cloud",
            (None, Network::Testnet) => "https://testnet-api.algonode.cloud",
        }
    }

    /// Load from the file named by `ALGOFI_CONFIG`, or defaults when unset.
    pub fn load() -> ClientResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => {
                tracing::warn!(env = CONFIG_ENV, "Config path not set, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ClientError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ClientResult<Self> {
        toml::from_str(content)
            .map_err(|e| ClientError::Config(format!("Failed to parse config: {e}")))
    }

    /// The program tables in effect: the override when present, the
    /// built-in tables otherwise.
    pub fn network_config(&self) -> NetworkConfig {
        self.programs
            .clone()
            .unwrap_or_else(|| NetworkConfig::for_network(self.network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algofi_core::{AppId, AssetId};
    use algofi_lending::MarketType;

    #[test]
    fn test_testnet_tables() {
        let config = NetworkConfig::for_network(Network::Testnet);
        assert_eq!(config.staking.pools.len(), 4);
        assert!(config
            .staking
            .pools
            .iter()
            .all(|p| p.asset_id == AssetId::new(TESTNET_STAKED_ASSET)));
        assert!(config.staking.pool(AppId::new(96284557)).is_some());
        assert!(config.governance.is_none());
    }

    #[test]
    fn test_mainnet_tables_empty() {
        let config = NetworkConfig::for_network(Network::Mainnet);
        assert!(config.staking.pools.is_empty());
        assert!(config.lending.markets.is_empty());
    }

    #[test]
    fn test_parse_with_program_override() {
        let config = ClientConfig::from_toml(
            r#"
            network = "mainnet"
            algod_url = "http://localhost:4001"
            algod_token = "secret"

            [[programs.assets]]
            asset_id = 31566704
            name = "USDC"
            decimals = 6

            [[programs.lending.markets]]
            name = "USDC"
            app_id = 818182048
            underlying_asset_id = 31566704
            b_asset_id = 818182311
            market_type = "vault"

            [[programs.staking.pools]]
            app_id = 1
            asset_id = 2

            [programs.governance]
            admin_app_id = 10
            voting_escrow_app_id = 11
            governance_token = 13
            "#,
        )
        .unwrap();

        assert_eq!(config.algod_url(), "http://localhost:4001");
        assert_eq!(config.analytics_url, default_analytics_url());
        let programs = config.network_config();
        assert_eq!(programs.assets.get(AssetId::new(31566704)).unwrap().name, "USDC");
        assert_eq!(programs.lending.markets[0].market_type, MarketType::Vault);
        assert_eq!(programs.staking.pools.len(), 1);
        assert_eq!(
            programs.governance.unwrap().voting_escrow_app_id,
            AppId::new(11)
        );
    }

    #[test]
    fn test_defaults_fall_back_to_builtin_tables() {
        let config = ClientConfig::from_toml(r#"network = "testnet""#).unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.algod_url(), "https://testnet-api.algonode.cloud");
        assert_eq!(config.network_config().staking.pools.len(), 4);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ClientConfig::from_toml("network = 5"),
            Err(ClientError::Config(_))
        ));
    }
}
