//! Governance registry and transaction entry points.

use crate::admin::Admin;
use crate::config::GovernanceConfig;
use crate::error::{GovernanceError, GovernanceResult};
use crate::proposal::Proposal;
use crate::user::{storage_address, UserAdminState, UserGovernanceState, UserVotingEscrowState};
use crate::voting_escrow::VotingEscrow;
use algofi_core::{Address, AppId, DecodeResult, RawState, StateRecord};
use algofi_ledger::{load_programs, DynLedger, LocalStates};
use algofi_telemetry::Metrics;
use algofi_txn::{BuiltTxns, SuggestedParams};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Product label for logs and metrics.
const PRODUCT: &str = "governance";

/// Everything loaded by one governance load, published together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GovernanceSnapshot {
    pub voting_escrow: Option<VotingEscrow>,
    pub admin: Option<Admin>,
    pub proposals: BTreeMap<AppId, Proposal>,
}

/// Loads and holds the governance programs.
pub struct GovernanceClient {
    ledger: DynLedger,
    config: Option<Arc<GovernanceConfig>>,
    snapshot: RwLock<Arc<GovernanceSnapshot>>,
}

impl GovernanceClient {
    /// `config` is `None` on networks without governance programs.
    pub fn new(ledger: DynLedger, config: Option<Arc<GovernanceConfig>>) -> Self {
        Self {
            ledger,
            config,
            snapshot: RwLock::new(Arc::new(GovernanceSnapshot::default())),
        }
    }

    fn config(&self) -> GovernanceResult<&GovernanceConfig> {
        self.config.as_deref().ok_or(GovernanceError::NotConfigured)
    }

    pub fn snapshot(&self) -> Arc<GovernanceSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Load the voting escrow and admin concurrently, then every proposal
    /// created by the admin's proposal factory.
    pub async fn load_state(&self) {
        let Some(config) = self.config.clone() else {
            return;
        };

        let (voting_escrow, admin) = tokio::join!(
            self.load_one(config.voting_escrow_app_id, |raw| {
                VotingEscrow::from_state(&config, raw)
            }),
            self.load_one(config.admin_app_id, |raw| {
                Admin::from_state(config.admin_app_id, raw)
            }),
        );

        let proposals = match &admin {
            Some(admin) => self.load_proposals(admin).await,
            None => BTreeMap::new(),
        };

        info!(
            voting_escrow = voting_escrow.is_some(),
            admin = admin.is_some(),
            proposals = proposals.len(),
            "Governance loaded"
        );
        *self.snapshot.write() = Arc::new(GovernanceSnapshot {
            voting_escrow,
            admin,
            proposals,
        });
    }

    async fn load_one<T, F>(&self, app_id: AppId, decode: F) -> Option<T>
    where
        F: Fn(&RawState) -> DecodeResult<T>,
    {
        let programs =
            load_programs(self.ledger.as_ref(), PRODUCT, [app_id], |_, raw| decode(raw)).await;
        programs.into_values().next()
    }

    async fn load_proposals(&self, admin: &Admin) -> BTreeMap<AppId, Proposal> {
        let factory = admin.proposal_factory_address();
        let app_ids = match self.ledger.created_applications(factory).await {
            Ok(app_ids) => app_ids,
            Err(error) => {
                warn!(%factory, %error, "Proposal discovery failed");
                Metrics::program_loaded(PRODUCT, false);
                return BTreeMap::new();
            }
        };
        load_programs(self.ledger.as_ref(), PRODUCT, app_ids, Proposal::from_state).await
    }

    pub fn voting_escrow(&self) -> GovernanceResult<VotingEscrow> {
        let config = self.config()?;
        self.snapshot()
            .voting_escrow
            .clone()
            .ok_or(GovernanceError::VotingEscrowNotLoaded(config.voting_escrow_app_id))
    }

    pub fn admin(&self) -> GovernanceResult<Admin> {
        let config = self.config()?;
        self.snapshot()
            .admin
            .clone()
            .ok_or(GovernanceError::AdminNotLoaded(config.admin_app_id))
    }

    /// Decode a user's governance state from already fetched local states.
    ///
    /// Reads the storage account's local states when the user has one.
    pub async fn user_from_local_states(
        &self,
        address: Address,
        locals: &LocalStates,
    ) -> GovernanceResult<UserGovernanceState> {
        let config = self.config()?;
        let snapshot = self.snapshot();

        let voting_escrow = locals
            .get(&config.voting_escrow_app_id)
            .and_then(|raw| match UserVotingEscrowState::decode_state(raw) {
                Ok(state) => Some(state),
                Err(error) => {
                    warn!(%address, %error, "User voting escrow state skipped");
                    None
                }
            });

        let storage = locals
            .get(&config.admin_app_id)
            .and_then(|raw| match storage_address(raw) {
                Ok(storage) => Some(storage),
                Err(error) => {
                    warn!(%address, %error, "User storage address skipped");
                    None
                }
            });

        let admin = match storage {
            Some(storage) => {
                let storage_locals = self.ledger.local_states(storage).await?;
                match UserAdminState::from_storage_local_states(
                    storage,
                    config.admin_app_id,
                    &snapshot.proposals,
                    &storage_locals,
                ) {
                    Ok(state) => Some(state),
                    Err(error) => {
                        warn!(%address, %storage, %error, "User admin state skipped");
                        None
                    }
                }
            }
            None => None,
        };

        Ok(UserGovernanceState {
            address,
            voting_escrow,
            admin,
        })
    }

    /// Fetch and decode a user's governance state.
    pub async fn get_user(&self, address: Address) -> GovernanceResult<UserGovernanceState> {
        let locals = self.ledger.local_states(address).await?;
        self.user_from_local_states(address, &locals).await
    }

    /// Fetch a user's voting escrow position.
    ///
    /// Fails with [`GovernanceError::NotOptedIn`] when the user holds no
    /// local state in the escrow.
    pub async fn user_voting_escrow(
        &self,
        address: Address,
    ) -> GovernanceResult<UserVotingEscrowState> {
        let app_id = self.config()?.voting_escrow_app_id;
        let locals = self.ledger.local_states(address).await?;
        let raw = locals
            .get(&app_id)
            .ok_or(GovernanceError::NotOptedIn { app_id, address })?;
        Ok(UserVotingEscrowState::decode_state(raw)?)
    }

    async fn escrow_and_params(
        &self,
    ) -> GovernanceResult<(VotingEscrow, SuggestedParams)> {
        let escrow = self.voting_escrow()?;
        let params = self.ledger.suggested_params().await?;
        Ok((escrow, params))
    }

    /// Like `escrow_and_params`, for actions on an existing position.
    async fn position_escrow_and_params(
        &self,
        sender: Address,
    ) -> GovernanceResult<(VotingEscrow, SuggestedParams)> {
        let escrow = self.voting_escrow()?;
        self.user_voting_escrow(sender).await?;
        let params = self.ledger.suggested_params().await?;
        Ok((escrow, params))
    }

    pub async fn lock_txns(&self, sender: Address, amount: u64) -> GovernanceResult<BuiltTxns> {
        let (escrow, params) = self.escrow_and_params().await?;
        escrow.lock_txns(sender, amount, &params)
    }

    pub async fn increase_lock_amount_txns(
        &self,
        sender: Address,
        amount: u64,
    ) -> GovernanceResult<BuiltTxns> {
        let (escrow, params) = self.position_escrow_and_params(sender).await?;
        escrow.increase_lock_amount_txns(sender, amount, &params)
    }

    pub async fn extend_lock_txns(
        &self,
        sender: Address,
        duration_seconds: u64,
    ) -> GovernanceResult<BuiltTxns> {
        let (escrow, params) = self.position_escrow_and_params(sender).await?;
        escrow.extend_lock_txns(sender, duration_seconds, &params)
    }

    pub async fn claim_txns(&self, sender: Address) -> GovernanceResult<BuiltTxns> {
        let (escrow, params) = self.position_escrow_and_params(sender).await?;
        escrow.claim_txns(sender, &params)
    }

    pub async fn update_vebank_data_txns(
        &self,
        sender: Address,
        target: Address,
    ) -> GovernanceResult<BuiltTxns> {
        let (escrow, params) = self.escrow_and_params().await?;
        escrow.update_vebank_data_txns(sender, target, &params)
    }

    pub async fn opt_in_txns(&self, sender: Address) -> GovernanceResult<BuiltTxns> {
        let (escrow, params) = self.escrow_and_params().await?;
        escrow.opt_in_txns(sender, &params)
    }
}
