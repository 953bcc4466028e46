//! Static governance configuration.

use algofi_core::{AppId, AssetId};
use serde::{Deserialize, Serialize};

/// Default minimum lock: one week.
const DEFAULT_MIN_LOCK_SECONDS: u64 = 7 * 24 * 60 * 60;
/// Default maximum lock: four years.
const DEFAULT_MAX_LOCK_SECONDS: u64 = 4 * 365 * 24 * 60 * 60;

fn default_min_lock_seconds() -> u64 {
    DEFAULT_MIN_LOCK_SECONDS
}

fn default_max_lock_seconds() -> u64 {
    DEFAULT_MAX_LOCK_SECONDS
}

/// Governance programs on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    pub admin_app_id: AppId,
    pub voting_escrow_app_id: AppId,
    pub governance_token: AssetId,
    #[serde(default = "default_min_lock_seconds")]
    pub min_lock_seconds: u64,
    #[serde(default = "default_max_lock_seconds")]
    pub max_lock_seconds: u64,
}

impl GovernanceConfig {
    /// Whether a lock of `duration` seconds is within the configured bounds, inclusive.
    pub fn lock_duration_in_range(&self, duration: u64) -> bool {
        (self.min_lock_seconds..=self.max_lock_seconds).contains(&duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_toml() {
        let config: GovernanceConfig = toml::from_str(
            r#"
            admin_app_id = 1
            voting_escrow_app_id = 2
            governance_token = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.min_lock_seconds, DEFAULT_MIN_LOCK_SECONDS);
        assert!(config.lock_duration_in_range(DEFAULT_MAX_LOCK_SECONDS));
        assert!(!config.lock_duration_in_range(DEFAULT_MAX_LOCK_SECONDS + 1));
        assert!(!config.lock_duration_in_range(60));
    }
}
