//! Static staking configuration.

use algofi_core::{AppId, AssetId};
use serde::{Deserialize, Serialize};

/// One deployed staking pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub app_id: AppId,
    /// Asset staked into the pool.
    pub asset_id: AssetId,
}

impl PoolConfig {
    pub fn new(app_id: u64, asset_id: u64) -> Self {
        Self {
            app_id: AppId::new(app_id),
            asset_id: AssetId::new(asset_id),
        }
    }
}

/// Staking programs on one network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    #[serde(default)]
    pub pools: Vec<PoolConfig>,
}

impl StakingConfig {
    pub fn pool(&self, app_id: AppId) -> Option<&PoolConfig> {
        self.pools.iter().find(|p| p.app_id == app_id)
    }
}
