//! Static lending configuration.

use algofi_core::{AppId, AssetId};
use serde::{Deserialize, Serialize};

/// Market variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    #[default]
    Standard,
    /// Stablecoin market minting against collateral.
    Stbl,
    /// Market whose b asset is permanently locked.
    Vault,
}

impl MarketType {
    /// Vault b assets never leave the market, so they carry no price.
    pub fn has_transferable_b_asset(&self) -> bool {
        !matches!(self, Self::Vault)
    }
}

/// One deployed market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub name: String,
    pub app_id: AppId,
    pub underlying_asset_id: AssetId,
    pub b_asset_id: AssetId,
    #[serde(default)]
    pub market_type: MarketType,
}

/// Lending programs on one network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingConfig {
    #[serde(default)]
    pub markets: Vec<MarketConfig>,
}

impl LendingConfig {
    pub fn market(&self, app_id: AppId) -> Option<&MarketConfig> {
        self.markets.iter().find(|m| m.app_id == app_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_b_asset_not_transferable() {
        assert!(MarketType::Standard.has_transferable_b_asset());
        assert!(MarketType::Stbl.has_transferable_b_asset());
        assert!(!MarketType::Vault.has_transferable_b_asset());
    }

    #[test]
    fn test_market_lookup() {
        let config = LendingConfig {
            markets: vec![MarketConfig {
                name: "USDC".to_string(),
                app_id: AppId::new(5),
                underlying_asset_id: AssetId::new(10),
                b_asset_id: AssetId::new(11),
                market_type: MarketType::Standard,
            }],
        };
        assert_eq!(config.market(AppId::new(5)).unwrap().name, "USDC");
        assert!(config.market(AppId::new(6)).is_none());
    }
}
