//! Ledger read abstraction.

use crate::error::LedgerResult;
use algofi_core::{Address, AppId, RawState};
use algofi_txn::SuggestedParams;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// An account's local state, per application it is opted into.
pub type LocalStates = HashMap<AppId, RawState>;

/// Read access to the ledger.
///
/// Implementations own their own concurrency limits; callers issue reads
/// concurrently and await them jointly.
pub trait LedgerClient: Send + Sync {
    /// Global key-value state of an application.
    fn global_state(&self, app_id: AppId) -> BoxFuture<'_, LedgerResult<RawState>>;

    /// Local key-value state of `address` for every application it has opted into.
    fn local_states(&self, address: Address) -> BoxFuture<'_, LedgerResult<LocalStates>>;

    /// Ids of applications created by `address`.
    fn created_applications(&self, address: Address) -> BoxFuture<'_, LedgerResult<Vec<AppId>>>;

    /// Parameters for building new transactions.
    fn suggested_params(&self) -> BoxFuture<'_, LedgerResult<SuggestedParams>>;
}

/// Arc wrapper for LedgerClient trait objects.
pub type DynLedger = Arc<dyn LedgerClient>;
