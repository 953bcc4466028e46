//! State schemas and decoded records.
//!
//! A [`Schema`] is the ordered list of `(field, key, kind)` triples a
//! program family stores. Item schemas of indexed families use the key
//! *prefix* as the field key; the element index is appended when encoding.

use crate::address::Address;
use crate::error::{DecodeError, DecodeResult};
use crate::keys::encode_indexed_key;
use crate::state::{StateValue, ValueKind};

/// One declared field of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Semantic field name.
    pub name: &'static str,
    /// Encoded key (or key prefix for indexed items).
    pub key: &'static str,
    /// Expected value kind.
    pub kind: ValueKind,
}

impl FieldSpec {
    pub const fn uint(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            kind: ValueKind::Uint,
        }
    }

    pub const fn bytes(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            kind: ValueKind::Bytes,
        }
    }

    /// The raw key this field is stored under, for element `index` when the
    /// field belongs to an indexed family.
    pub fn encoded_key(&self, index: Option<u64>) -> Vec<u8> {
        match index {
            Some(i) => encode_indexed_key(self.key, i),
            None => self.key.as_bytes().to_vec(),
        }
    }
}

/// Ordered set of fields of one program family (or one indexed item).
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Raw keys of a scalar record.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.fields.iter().map(|f| f.encoded_key(None)).collect()
    }

    /// Raw keys of element `index` of an indexed family.
    pub fn item_keys(&self, index: u64) -> Vec<Vec<u8>> {
        self.fields.iter().map(|f| f.encoded_key(Some(index))).collect()
    }
}

/// A decoded record: every schema field present with the declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    schema: &'static str,
    index: Option<u64>,
    values: Vec<(FieldSpec, StateValue)>,
}

impl Record {
    pub(crate) fn new(
        schema: &'static str,
        index: Option<u64>,
        values: Vec<(FieldSpec, StateValue)>,
    ) -> Self {
        Self {
            schema,
            index,
            values,
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema
    }

    /// Element index for records of an indexed family.
    pub fn index(&self) -> Option<u64> {
        self.index
    }

    fn value(&self, field: &'static str) -> DecodeResult<&StateValue> {
        self.values
            .iter()
            .find(|(field_spec, _)| field_spec.name == field)
            .map(|(_, value)| value)
            .ok_or(DecodeError::UnknownField {
                schema: self.schema,
                field,
            })
    }

    pub fn uint(&self, field: &'static str) -> DecodeResult<u64> {
        self.value(field)?
            .as_uint()
            .ok_or_else(|| DecodeError::mismatch(field.as_bytes(), ValueKind::Uint.as_str()))
    }

    pub fn bytes(&self, field: &'static str) -> DecodeResult<&[u8]> {
        self.value(field)?
            .as_bytes()
            .ok_or_else(|| DecodeError::mismatch(field.as_bytes(), ValueKind::Bytes.as_str()))
    }

    /// Big-endian unsigned integer stored as bytes (at most 16 bytes).
    ///
    /// Empty byte strings decode as zero.
    pub fn u128_be(&self, field: &'static str) -> DecodeResult<u128> {
        let raw = self.bytes(field)?;
        if raw.len() > 16 {
            return Err(DecodeError::InvalidValue {
                field,
                reason: format!("{} bytes exceed 128-bit integer", raw.len()),
            });
        }
        Ok(raw.iter().fold(0u128, |acc, b| (acc << 8) | u128::from(*b)))
    }

    /// Address stored as a raw 32-byte public key.
    pub fn address(&self, field: &'static str) -> DecodeResult<Address> {
        let raw = self.bytes(field)?;
        Address::from_slice(raw).map_err(|e| DecodeError::InvalidValue {
            field,
            reason: e.to_string(),
        })
    }

    /// Re-encode the raw keys this record was decoded from.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.values
            .iter()
            .map(|(field_spec, _)| field_spec.encoded_key(self.index))
            .collect()
    }
}
