//! Raw program state as read from the ledger.
//!
//! A program's global state (or an account's local state for one program)
//! is an unordered mapping from byte-string keys to values that are either
//! unsigned integers or byte strings. Snapshots are immutable; a reload
//! replaces the whole mapping.

use std::collections::HashMap;
use std::fmt;

/// Kind of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Uint,
    Bytes,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uint => "uint",
            Self::Bytes => "bytes",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    Uint(u64),
    Bytes(Vec<u8>),
}

impl StateValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Uint(_) => ValueKind::Uint,
            Self::Bytes(_) => ValueKind::Bytes,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            Self::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::Uint(_) => None,
        }
    }
}

impl From<u64> for StateValue {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<Vec<u8>> for StateValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

/// Immutable key-value snapshot of one program's (or one account's) state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawState {
    entries: HashMap<Vec<u8>, StateValue>,
}

impl RawState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<StateValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert of an integer value.
    pub fn with_uint(mut self, key: impl Into<Vec<u8>>, value: u64) -> Self {
        self.insert(key, StateValue::Uint(value));
        self
    }

    /// Builder-style insert of a byte-string value.
    pub fn with_bytes(mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        self.insert(key, StateValue::Bytes(value.into()));
        self
    }

    pub fn get(&self, key: &[u8]) -> Option<&StateValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<StateValue> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Vec<u8>> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &StateValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Vec<u8>, StateValue)> for RawState {
    fn from_iter<T: IntoIterator<Item = (Vec<u8>, StateValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
