//! Ledger account addresses.
//!
//! An address is a 32-byte public key. Its text form is the base32
//! (RFC 4648 alphabet, no padding) encoding of the key followed by a
//! 4-byte checksum: the last four bytes of `SHA-512/256(key)`.
//!
//! Applications own an escrow address derived from their id, which is the
//! receiver of every asset transfer that feeds a program call.

use crate::error::AddressError;
use crate::ids::AppId;
use data_encoding::{DecodeKind, BASE32_NOPAD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};
use std::fmt;
use std::str::FromStr;

const CHECKSUM_LEN: usize = 4;
/// Length of the text form of an address.
pub const ADDRESS_STR_LEN: usize = 58;
/// Domain separator for application escrow addresses.
const APP_ID_PREFIX: &[u8] = b"appID";

/// `SHA-512/256` digest, the hash used for addresses, transaction ids and group ids.
pub fn sha512_256(data: &[u8]) -> [u8; 32] {
    let digest = Sha512_256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Ledger account address (public key).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(public_key: [u8; 32]) -> Self {
        Self(public_key)
    }

    /// Build from a raw 32-byte slice (e.g. an address stored in program state).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let key: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Self(key))
    }

    /// Escrow address of an application.
    pub fn for_application(app_id: AppId) -> Self {
        let mut data = Vec::with_capacity(APP_ID_PREFIX.len() + 8);
        data.extend_from_slice(APP_ID_PREFIX);
        data.extend_from_slice(&app_id.get().to_be_bytes());
        Self(sha512_256(&data))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        let digest = sha512_256(&self.0);
        let mut out = [0u8; CHECKSUM_LEN];
        out.copy_from_slice(&digest[32 - CHECKSUM_LEN..]);
        out
    }
}

/// RFC 4648 base32 without padding, the text form of addresses and transaction ids.
pub fn base32_encode(data: &[u8]) -> String {
    BASE32_NOPAD.encode(data)
}

fn base32_decode(text: &str) -> Result<Vec<u8>, AddressError> {
    BASE32_NOPAD.decode(text.as_bytes()).map_err(|e| {
        let symbol = match e.kind {
            DecodeKind::Symbol => text.get(e.position..).and_then(|rest| rest.chars().next()),
            _ => None,
        };
        match symbol {
            Some(c) => AddressError::InvalidCharacter(c),
            None => AddressError::InvalidEncoding(e.to_string()),
        }
    })
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data = Vec::with_capacity(32 + CHECKSUM_LEN);
        data.extend_from_slice(&self.0);
        data.extend_from_slice(&self.checksum());
        f.write_str(&base32_encode(&data))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_STR_LEN {
            return Err(AddressError::InvalidLength(s.len()));
        }
        let decoded = base32_decode(s)?;
        if decoded.len() != 32 + CHECKSUM_LEN {
            return Err(AddressError::InvalidLength(decoded.len()));
        }
        let address = Self::from_slice(&decoded[..32])?;
        if address.checksum()[..] != decoded[32..] {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(address)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
