//! Staking pool registry and transaction entry points.

use crate::config::StakingConfig;
use crate::error::{StakingError, StakingResult};
use crate::pool::StakingPool;
use crate::user::{StakingUser, UserStakingState};
use algofi_core::{Address, AppId};
use algofi_ledger::{load_programs, DynLedger, LocalStates, ProgramRegistry};
use algofi_txn::BuiltTxns;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Product label for logs and metrics.
const PRODUCT: &str = "staking";

/// Loads and holds every configured staking pool.
pub struct StakingClient {
    ledger: DynLedger,
    config: Arc<StakingConfig>,
    pools: ProgramRegistry<StakingPool>,
}

impl StakingClient {
    pub fn new(ledger: DynLedger, config: Arc<StakingConfig>) -> Self {
        Self {
            ledger,
            config,
            pools: ProgramRegistry::new(),
        }
    }

    pub fn config(&self) -> &StakingConfig {
        &self.config
    }

    /// Load every configured pool and publish the successful ones.
    ///
    /// Returns the number of pools loaded.
    pub async fn load_state(&self) -> usize {
        let config = Arc::clone(&self.config);
        let pools = load_programs(
            self.ledger.as_ref(),
            PRODUCT,
            config.pools.iter().map(|p| p.app_id),
            |app_id, raw| -> StakingResult<StakingPool> {
                let pool_config = config
                    .pool(app_id)
                    .ok_or(StakingError::UnknownPool(app_id))?;
                Ok(StakingPool::from_state(*pool_config, raw)?)
            },
        )
        .await;

        let loaded = pools.len();
        info!(
            loaded,
            configured = self.config.pools.len(),
            "Staking pools loaded"
        );
        self.pools.publish(pools);
        loaded
    }

    /// Snapshot of the loaded pools.
    pub fn pools(&self) -> Arc<BTreeMap<AppId, StakingPool>> {
        self.pools.snapshot()
    }

    pub fn pool(&self, app_id: AppId) -> StakingResult<StakingPool> {
        self.pools.get(app_id).ok_or(StakingError::PoolNotLoaded(app_id))
    }

    /// Decode a user's staking state from already fetched local states.
    pub fn user_from_local_states(&self, address: Address, locals: &LocalStates) -> StakingUser {
        StakingUser::from_local_states(address, &self.pools(), locals)
    }

    /// Fetch and decode a user's staking state.
    pub async fn get_user(&self, address: Address) -> StakingResult<StakingUser> {
        let locals = self.ledger.local_states(address).await?;
        Ok(self.user_from_local_states(address, &locals))
    }

    pub async fn stake_txns(
        &self,
        app_id: AppId,
        sender: Address,
        amount: u64,
    ) -> StakingResult<BuiltTxns> {
        let pool = self.pool(app_id)?;
        let params = self.ledger.suggested_params().await?;
        pool.stake_txns(sender, amount, &params)
    }

    pub async fn unstake_txns(
        &self,
        app_id: AppId,
        sender: Address,
        amount: u64,
    ) -> StakingResult<BuiltTxns> {
        let pool = self.pool(app_id)?;
        let params = self.ledger.suggested_params().await?;
        pool.unstake_txns(sender, amount, &params)
    }

    /// Claim transactions for every rewards program with unrealized rewards.
    ///
    /// Re-reads the user's local state first; cached user state is never used.
    pub async fn claim_txns(&self, app_id: AppId, sender: Address) -> StakingResult<BuiltTxns> {
        let pool = self.pool(app_id)?;
        let locals = self.ledger.local_states(sender).await?;
        let raw = locals.get(&app_id).ok_or(StakingError::NotOptedIn {
            app_id,
            address: sender,
        })?;
        let user = UserStakingState::from_local_state(&pool, raw)?;
        debug!(app_id = %app_id, claimable = ?user.claimable_indices(), "Building claim");

        let params = self.ledger.suggested_params().await?;
        pool.claim_txns(sender, &user, &params)
    }

    pub async fn opt_in_txns(&self, app_id: AppId, sender: Address) -> StakingResult<BuiltTxns> {
        let pool = self.pool(app_id)?;
        let params = self.ledger.suggested_params().await?;
        pool.opt_in_txns(sender, &params)
    }
}
