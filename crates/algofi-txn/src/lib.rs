//! Transaction model and atomic groups.
//!
//! # Key Components
//!
//! - [`Transaction`]: asset transfer or application call, with canonical
//!   msgpack encoding and transaction id
//! - [`BuiltTxns`]: outcome of a transaction recipe: empty, a single
//!   ungrouped transaction, or an atomic group sharing one [`GroupId`]
//! - [`FeePolicy`]: static per-action fee overrides
//! - [`SuggestedParams`]: validity window and genesis data from the ledger

pub mod args;
pub mod error;
pub mod fee;
pub mod group;
pub mod params;
pub mod transaction;

pub use args::{itob, method_args};
pub use error::{TxnError, TxnResult};
pub use fee::{FeePolicy, MIN_TXN_FEE};
pub use group::{assign_group_id, compute_group_id, BuiltTxns, GroupId, MAX_GROUP_SIZE};
pub use params::SuggestedParams;
pub use transaction::{AppCall, OnComplete, Transaction, TxnId, TxnKind};
