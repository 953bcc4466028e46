//! Combined per-user state.

use algofi_assets::AssetBook;
use algofi_core::Address;
use algofi_governance::UserGovernanceState;
use algofi_staking::{StakingConfig, StakingUser};
use rust_decimal::Decimal;

/// A user's state across every product line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgofiUser {
    pub address: Address,
    pub staking: StakingUser,
    /// `None` on networks without governance programs.
    pub governance: Option<UserGovernanceState>,
}

impl AlgofiUser {
    /// USD value of everything staked, at the asset book's prices.
    ///
    /// Positions in pools missing from `staking` are not counted. `None`
    /// when the total does not fit a `Decimal`.
    pub fn staked_usd(&self, staking: &StakingConfig, assets: &AssetBook) -> Option<Decimal> {
        self.staking
            .states
            .iter()
            .filter_map(|(app_id, state)| {
                let pool = staking.pool(*app_id)?;
                Some(assets.to_usd(pool.asset_id, state.total_staked))
            })
            .try_fold(Decimal::ZERO, |total, usd| total.checked_add(usd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algofi_assets::{Asset, PriceSource};
    use algofi_core::{AppId, AssetId};
    use algofi_staking::{PoolConfig, UserStakingState};
    use rust_decimal_macros::dec;

    fn position(app: u64, total_staked: u64) -> (AppId, UserStakingState) {
        let state = UserStakingState {
            app_id: AppId::new(app),
            total_staked,
            scaled_total_staked: total_staked,
            boost_multiplier: 0,
            rewards_programs: Vec::new(),
        };
        (AppId::new(app), state)
    }

    fn user(positions: Vec<(AppId, UserStakingState)>) -> AlgofiUser {
        let address = Address::new([3u8; 32]);
        AlgofiUser {
            address,
            staking: StakingUser {
                address,
                states: positions.into_iter().collect(),
            },
            governance: None,
        }
    }

    fn book(price: Decimal) -> AssetBook {
        let mut book = AssetBook::new();
        book.insert(Asset {
            asset_id: AssetId::new(9),
            name: "STAKE".to_string(),
            decimals: 0,
            price,
            source: PriceSource::Feed,
        });
        book
    }

    fn staking() -> StakingConfig {
        StakingConfig {
            pools: vec![PoolConfig::new(1, 9), PoolConfig::new(2, 9)],
        }
    }

    #[test]
    fn test_staked_usd_sums_known_pools() {
        let user = user(vec![position(1, 3), position(2, 4), position(99, 1_000)]);
        assert_eq!(user.staked_usd(&staking(), &book(dec!(1.5))), Some(dec!(10.5)));
    }

    #[test]
    fn test_staked_usd_overflow_is_none() {
        // each position alone fits, the sum does not
        let user = user(vec![position(1, u64::MAX), position(2, u64::MAX)]);
        assert_eq!(user.staked_usd(&staking(), &book(dec!(3000000000))), None);
    }
}
