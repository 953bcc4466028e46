//! Core types for the Algofi SDK.
//!
//! This crate provides the pieces every product line builds on:
//! - `AppId`, `AssetId`, `Network`: identifiers of deployed programs and assets
//! - `Address`: ledger account addresses, including application escrow addresses
//! - `RawState`: the unordered key-value state snapshot read from the ledger
//! - `keys`: encoding of fixed and indexed state keys
//! - `schema` / `decode`: schema-driven decoding into typed records

pub mod address;
pub mod asset_config;
pub mod decode;
pub mod error;
pub mod ids;
pub mod keys;
pub mod schema;
pub mod state;
pub mod units;

pub use address::{base32_encode, sha512_256, Address};
pub use asset_config::{AssetConfig, AssetTable};
pub use decode::{
    decode, decode_family, decode_indexed_family, decode_indexed_family_with_count, IndexedRecord,
    StateRecord,
};
pub use error::{AddressError, DecodeError, DecodeResult};
pub use ids::{AppId, AssetId, Network};
pub use keys::{encode_indexed_key, split_indexed_key, MAX_FAMILY_SIZE};
pub use schema::{FieldSpec, Record, Schema};
pub use state::{RawState, StateValue, ValueKind};
pub use units::{from_base_units, one_unit};
