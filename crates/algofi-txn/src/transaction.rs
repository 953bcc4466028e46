//! Transactions and their canonical encoding.
//!
//! The ledger identifies a transaction by `SHA-512/256("TX" ++ msgpack(txn))`
//! where the msgpack map uses the ledger's short field names, keys sorted,
//! zero/empty fields omitted and byte fields encoded as binary.

use crate::error::{TxnError, TxnResult};
use crate::fee::FeePolicy;
use crate::params::SuggestedParams;
use algofi_core::{base32_encode, sha512_256, Address, AppId, AssetId};
use serde::{Serialize, Serializer};
use std::fmt;

/// Domain separator for transaction ids.
const TXN_ID_PREFIX: &[u8] = b"TX";

/// Application call completion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnComplete {
    NoOp = 0,
    OptIn = 1,
    CloseOut = 2,
    ClearState = 3,
}

/// Application call fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCall {
    pub app_id: AppId,
    pub on_complete: OnComplete,
    pub args: Vec<Vec<u8>>,
    pub foreign_apps: Vec<AppId>,
    pub foreign_assets: Vec<AssetId>,
    pub accounts: Vec<Address>,
}

impl AppCall {
    /// No-op call with the given arguments and no cross-references.
    pub fn no_op(app_id: AppId, args: Vec<Vec<u8>>) -> Self {
        Self {
            app_id,
            on_complete: OnComplete::NoOp,
            args,
            foreign_apps: Vec::new(),
            foreign_assets: Vec::new(),
            accounts: Vec::new(),
        }
    }

    /// Opt-in call with no arguments.
    pub fn opt_in(app_id: AppId) -> Self {
        Self {
            on_complete: OnComplete::OptIn,
            ..Self::no_op(app_id, Vec::new())
        }
    }

    pub fn with_foreign_apps(mut self, apps: impl IntoIterator<Item = AppId>) -> Self {
        self.foreign_apps = apps.into_iter().collect();
        self
    }

    pub fn with_foreign_assets(mut self, assets: impl IntoIterator<Item = AssetId>) -> Self {
        self.foreign_assets = assets.into_iter().collect();
        self
    }

    pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Address>) -> Self {
        self.accounts = accounts.into_iter().collect();
        self
    }
}

/// Transaction body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxnKind {
    AssetTransfer {
        receiver: Address,
        asset_id: AssetId,
        amount: u64,
    },
    ApplicationCall(AppCall),
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub sender: Address,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
    /// Shared group identifier, set only for members of an atomic group.
    pub group: Option<[u8; 32]>,
    pub kind: TxnKind,
}

impl Transaction {
    fn with_params(sender: Address, fee: u64, params: &SuggestedParams, kind: TxnKind) -> Self {
        Self {
            sender,
            fee,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
            group: None,
            kind,
        }
    }

    /// Asset transfer at the base fee.
    pub fn asset_transfer(
        sender: Address,
        receiver: Address,
        asset_id: AssetId,
        amount: u64,
        params: &SuggestedParams,
    ) -> Self {
        Self::with_params(
            sender,
            FeePolicy::Base.fee(params),
            params,
            TxnKind::AssetTransfer {
                receiver,
                asset_id,
                amount,
            },
        )
    }

    /// Application call with a fee override.
    pub fn app_call(
        sender: Address,
        call: AppCall,
        fee: FeePolicy,
        params: &SuggestedParams,
    ) -> Self {
        Self::with_params(sender, fee.fee(params), params, TxnKind::ApplicationCall(call))
    }

    pub fn as_app_call(&self) -> Option<&AppCall> {
        match &self.kind {
            TxnKind::ApplicationCall(call) => Some(call),
            TxnKind::AssetTransfer { .. } => None,
        }
    }

    fn type_tag(&self) -> &'static str {
        match self.kind {
            TxnKind::AssetTransfer { .. } => "axfer",
            TxnKind::ApplicationCall(_) => "appl",
        }
    }

    fn to_wire(&self) -> WireTxn<'_> {
        let mut wire = WireTxn {
            fee: self.fee,
            fv: self.first_valid,
            gen: &self.genesis_id,
            gh: Bin(&self.genesis_hash),
            grp: self.group.as_ref().map(|g| Bin(g)),
            lv: self.last_valid,
            snd: Bin(self.sender.as_bytes()),
            txn_type: self.type_tag(),
            ..WireTxn::default()
        };
        match &self.kind {
            TxnKind::AssetTransfer {
                receiver,
                asset_id,
                amount,
            } => {
                wire.aamt = *amount;
                wire.arcv = (*receiver != Address::ZERO).then(|| Bin(receiver.as_bytes()));
                wire.xaid = asset_id.get();
            }
            TxnKind::ApplicationCall(call) => {
                wire.apaa = call.args.iter().map(|a| Bin(a)).collect();
                wire.apan = call.on_complete as u64;
                wire.apas = call.foreign_assets.iter().map(|a| a.get()).collect();
                wire.apat = call.accounts.iter().map(|a| Bin(a.as_bytes())).collect();
                wire.apfa = call.foreign_apps.iter().map(|a| a.get()).collect();
                wire.apid = call.app_id.get();
            }
        }
        wire
    }

    /// Canonical msgpack encoding.
    pub fn encode(&self) -> TxnResult<Vec<u8>> {
        rmp_serde::to_vec_named(&self.to_wire()).map_err(|e| TxnError::Encoding(e.to_string()))
    }

    /// Transaction id: `SHA-512/256("TX" ++ encode())`.
    pub fn id(&self) -> TxnResult<TxnId> {
        let encoded = self.encode()?;
        let mut data = Vec::with_capacity(TXN_ID_PREFIX.len() + encoded.len());
        data.extend_from_slice(TXN_ID_PREFIX);
        data.extend_from_slice(&encoded);
        Ok(TxnId(sha512_256(&data)))
    }
}

/// Transaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxnId(pub [u8; 32]);

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base32_encode(&self.0))
    }
}

/// Byte string serialized as msgpack `bin`.
pub(crate) struct Bin<'a>(pub(crate) &'a [u8]);

impl Serialize for Bin<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

fn is_empty_str(s: &&str) -> bool {
    s.is_empty()
}

/// Wire form. Field order is the sorted key order the ledger hashes.
#[derive(Serialize, Default)]
struct WireTxn<'a> {
    #[serde(skip_serializing_if = "is_zero")]
    aamt: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    apaa: Vec<Bin<'a>>,
    #[serde(skip_serializing_if = "is_zero")]
    apan: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    apas: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    apat: Vec<Bin<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    apfa: Vec<u64>,
    #[serde(skip_serializing_if = "is_zero")]
    apid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    arcv: Option<Bin<'a>>,
    #[serde(skip_serializing_if = "is_zero")]
    fee: u64,
    #[serde(skip_serializing_if = "is_zero")]
    fv: u64,
    #[serde(skip_serializing_if = "is_empty_str")]
    gen: &'a str,
    gh: Bin<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grp: Option<Bin<'a>>,
    #[serde(skip_serializing_if = "is_zero")]
    lv: u64,
    snd: Bin<'a>,
    #[serde(rename = "type")]
    txn_type: &'a str,
    #[serde(skip_serializing_if = "is_zero")]
    xaid: u64,
}

impl Default for Bin<'_> {
    fn default() -> Self {
        Bin(&[])
    }
}
