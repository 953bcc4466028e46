//! Error types for algofi-core.

use thiserror::Error;

/// Failure while turning a raw key-value snapshot into a typed record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Missing key: {key}")]
    MissingKey { key: String },

    #[error("Type mismatch for key {key}: expected {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Inconsistent indexed family {family} at index {index}: {source}")]
    InconsistentIndexedFamily {
        family: &'static str,
        index: u64,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("Indexed family {family} count {count} exceeds limit {limit}")]
    FamilyTooLarge {
        family: &'static str,
        count: u64,
        limit: u64,
    },

    #[error("Field {field} is not declared by schema {schema}")]
    UnknownField {
        schema: &'static str,
        field: &'static str,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl DecodeError {
    /// Render a raw key for error messages (ASCII kept, other bytes hex-escaped).
    pub fn display_key(key: &[u8]) -> String {
        key.iter()
            .flat_map(|b| std::ascii::escape_default(*b))
            .map(char::from)
            .collect()
    }

    pub(crate) fn missing(key: &[u8]) -> Self {
        Self::MissingKey {
            key: Self::display_key(key),
        }
    }

    pub(crate) fn mismatch(key: &[u8], expected: &'static str) -> Self {
        Self::TypeMismatch {
            key: Self::display_key(key),
            expected,
        }
    }
}

/// Result type alias for decode operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Address parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Invalid address length: {0}")]
    InvalidLength(usize),

    #[error("Invalid base32 character: {0:?}")]
    InvalidCharacter(char),

    #[error("Invalid base32 encoding: {0}")]
    InvalidEncoding(String),

    #[error("Address checksum mismatch")]
    ChecksumMismatch,
}
