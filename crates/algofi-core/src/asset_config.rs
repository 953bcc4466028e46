//! Static asset configuration (name and decimals per asset id).

use crate::ids::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed description of an asset on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub asset_id: AssetId,
    pub name: String,
    pub decimals: u8,
}

impl AssetConfig {
    pub fn new(asset_id: u64, name: impl Into<String>, decimals: u8) -> Self {
        Self {
            asset_id: AssetId::new(asset_id),
            name: name.into(),
            decimals,
        }
    }
}

/// Asset configurations keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AssetConfig>", into = "Vec<AssetConfig>")]
pub struct AssetTable {
    assets: BTreeMap<AssetId, AssetConfig>,
}

impl AssetTable {
    pub fn new(assets: impl IntoIterator<Item = AssetConfig>) -> Self {
        Self {
            assets: assets.into_iter().map(|a| (a.asset_id, a)).collect(),
        }
    }

    pub fn get(&self, id: AssetId) -> Option<&AssetConfig> {
        self.assets.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetConfig> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl From<Vec<AssetConfig>> for AssetTable {
    fn from(assets: Vec<AssetConfig>) -> Self {
        Self::new(assets)
    }
}

impl From<AssetTable> for Vec<AssetConfig> {
    fn from(table: AssetTable) -> Self {
        table.assets.into_values().collect()
    }
}
