//! Atomic transaction groups.

use crate::error::{TxnError, TxnResult};
use crate::transaction::{Bin, Transaction};
use algofi_core::{base32_encode, sha512_256};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Maximum number of transactions in one atomic group.
pub const MAX_GROUP_SIZE: usize = 16;

/// Domain separator for group ids.
const GROUP_ID_PREFIX: &[u8] = b"TG";

/// Identifier shared by every member of an atomic group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub [u8; 32]);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base32_encode(&self.0))
    }
}

#[derive(Serialize)]
struct TxGroup<'a> {
    txlist: Vec<Bin<'a>>,
}

/// Group id over the ids of `txns` in order.
///
/// Any group already set on a member is ignored, so recomputing over a
/// grouped slice yields the same id.
pub fn compute_group_id(txns: &[Transaction]) -> TxnResult<GroupId> {
    if txns.is_empty() {
        return Err(TxnError::EmptyGroup);
    }
    if txns.len() > MAX_GROUP_SIZE {
        return Err(TxnError::GroupTooLarge(txns.len(), MAX_GROUP_SIZE));
    }

    let ids = txns
        .iter()
        .map(|txn| {
            let mut ungrouped = txn.clone();
            ungrouped.group = None;
            ungrouped.id().map(|id| id.0)
        })
        .collect::<TxnResult<Vec<[u8; 32]>>>()?;

    let group = TxGroup {
        txlist: ids.iter().map(|id| Bin(id)).collect(),
    };
    let encoded =
        rmp_serde::to_vec_named(&group).map_err(|e| TxnError::Encoding(e.to_string()))?;

    let mut data = Vec::with_capacity(GROUP_ID_PREFIX.len() + encoded.len());
    data.extend_from_slice(GROUP_ID_PREFIX);
    data.extend_from_slice(&encoded);
    Ok(GroupId(sha512_256(&data)))
}

/// Computes the group id and stamps it on every member.
pub fn assign_group_id(txns: &mut [Transaction]) -> TxnResult<GroupId> {
    let group_id = compute_group_id(txns)?;
    for txn in txns.iter_mut() {
        txn.group = Some(group_id.0);
    }
    debug!(size = txns.len(), group_id = %group_id, "Assigned group id");
    Ok(group_id)
}

/// Result of a transaction recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuiltTxns {
    /// Nothing to submit.
    Empty,
    /// One transaction with no group id.
    Single(Transaction),
    /// Two or more transactions sharing one group id.
    Grouped {
        group_id: GroupId,
        txns: Vec<Transaction>,
    },
}

impl BuiltTxns {
    /// Classifies `txns`: zero is empty, one is submitted alone, more are
    /// assigned a shared group id.
    pub fn from_txns(mut txns: Vec<Transaction>) -> TxnResult<Self> {
        match txns.len() {
            0 => Ok(Self::Empty),
            1 => {
                let mut txn = txns.remove(0);
                txn.group = None;
                Ok(Self::Single(txn))
            }
            _ => {
                let group_id = assign_group_id(&mut txns)?;
                Ok(Self::Grouped { group_id, txns })
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Grouped { txns, .. } => txns.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn transactions(&self) -> &[Transaction] {
        match self {
            Self::Empty => &[],
            Self::Single(txn) => std::slice::from_ref(txn),
            Self::Grouped { txns, .. } => txns,
        }
    }

    pub fn group_id(&self) -> Option<GroupId> {
        match self {
            Self::Grouped { group_id, .. } => Some(*group_id),
            _ => None,
        }
    }

    pub fn into_vec(self) -> Vec<Transaction> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(txn) => vec![txn],
            Self::Grouped { txns, .. } => txns,
        }
    }

    /// Metric label for the shape of the result.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Single(_) => "single",
            Self::Grouped { .. } => "grouped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::FeePolicy;
    use crate::params::SuggestedParams;
    use crate::transaction::AppCall;
    use algofi_core::{Address, AppId};

    fn params() -> SuggestedParams {
        SuggestedParams::from_last_round(500, 1_000, "testnet-v1.0", [9u8; 32])
    }

    fn call(app: u64) -> Transaction {
        Transaction::app_call(
            Address::new([2u8; 32]),
            AppCall::no_op(AppId::new(app), vec![b"cr".to_vec()]),
            FeePolicy::Base,
            &params(),
        )
    }

    #[test]
    fn test_empty_and_single() {
        let empty = BuiltTxns::from_txns(Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.shape(), "empty");
        assert!(empty.transactions().is_empty());

        let single = BuiltTxns::from_txns(vec![call(1)]).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.shape(), "single");
        assert!(single.group_id().is_none());
        assert!(single.transactions()[0].group.is_none());
    }

    #[test]
    fn test_grouped_members_share_id() {
        let built = BuiltTxns::from_txns(vec![call(1), call(2), call(3)]).unwrap();
        let group_id = built.group_id().unwrap();
        assert_eq!(built.shape(), "grouped");
        assert_eq!(built.len(), 3);
        for txn in built.transactions() {
            assert_eq!(txn.group, Some(group_id.0));
        }
    }

    #[test]
    fn test_group_id_is_order_sensitive_and_stable() {
        let a = compute_group_id(&[call(1), call(2)]).unwrap();
        let b = compute_group_id(&[call(2), call(1)]).unwrap();
        assert_ne!(a, b);

        let mut txns = vec![call(1), call(2)];
        let assigned = assign_group_id(&mut txns).unwrap();
        assert_eq!(assigned, a);
        assert_eq!(compute_group_id(&txns).unwrap(), a);
    }

    #[test]
    fn test_group_limits() {
        assert_eq!(compute_group_id(&[]), Err(TxnError::EmptyGroup));
        let txns: Vec<_> = (0..17).map(call).collect();
        assert_eq!(
            compute_group_id(&txns),
            Err(TxnError::GroupTooLarge(17, MAX_GROUP_SIZE))
        );
    }
}
