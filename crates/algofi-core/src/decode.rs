//! Schema-driven state decoding.
//!
//! Decoding is all-or-nothing: a record is produced only when every
//! declared key is present with the declared kind. Indexed families are
//! decoded for indices `0..count` in ascending order and any failing
//! element fails the whole family, so callers never see a partial or
//! sparse sequence.

use crate::error::{DecodeError, DecodeResult};
use crate::keys::MAX_FAMILY_SIZE;
use crate::schema::{FieldSpec, Record, Schema};
use crate::state::{RawState, ValueKind};

fn decode_fields(raw: &RawState, schema: &Schema, index: Option<u64>) -> DecodeResult<Record> {
    let mut values = Vec::with_capacity(schema.fields.len());
    for field in schema.fields {
        let key = field.encoded_key(index);
        let value = raw.get(&key).ok_or_else(|| DecodeError::missing(&key))?;
        if value.kind() != field.kind {
            return Err(DecodeError::mismatch(&key, field.kind.as_str()));
        }
        values.push((*field, value.clone()));
    }
    Ok(Record::new(schema.name, index, values))
}

/// Decode a scalar record.
pub fn decode(raw: &RawState, schema: &Schema) -> DecodeResult<Record> {
    decode_fields(raw, schema, None)
}

/// Decode an indexed family whose element count is stored in `count_field`
/// of the same state.
pub fn decode_indexed_family(
    raw: &RawState,
    count_field: &FieldSpec,
    items: &Schema,
) -> DecodeResult<Vec<Record>> {
    let key = count_field.encoded_key(None);
    let value = raw.get(&key).ok_or_else(|| DecodeError::missing(&key))?;
    let count = value
        .as_uint()
        .ok_or_else(|| DecodeError::mismatch(&key, ValueKind::Uint.as_str()))?;
    decode_indexed_family_with_count(raw, count, items)
}

/// Decode an indexed family with an externally known element count
/// (e.g. user local state indexed by the program's own count).
pub fn decode_indexed_family_with_count(
    raw: &RawState,
    count: u64,
    items: &Schema,
) -> DecodeResult<Vec<Record>> {
    if count > MAX_FAMILY_SIZE {
        return Err(DecodeError::FamilyTooLarge {
            family: items.name,
            count,
            limit: MAX_FAMILY_SIZE,
        });
    }
    (0..count)
        .map(|index| {
            decode_fields(raw, items, Some(index)).map_err(|e| {
                DecodeError::InconsistentIndexedFamily {
                    family: items.name,
                    index,
                    source: Box::new(e),
                }
            })
        })
        .collect()
}

/// A typed record decoded from a scalar schema.
pub trait StateRecord: Sized {
    const SCHEMA: &'static Schema;

    fn from_record(record: &Record) -> DecodeResult<Self>;

    fn decode_state(raw: &RawState) -> DecodeResult<Self> {
        Self::from_record(&decode(raw, Self::SCHEMA)?)
    }
}

/// A typed element of an indexed family.
pub trait IndexedRecord: Sized {
    const ITEM_SCHEMA: &'static Schema;

    fn from_item(index: u64, record: &Record) -> DecodeResult<Self>;
}

/// Decode `count` typed elements of an indexed family.
pub fn decode_family<T: IndexedRecord>(raw: &RawState, count: u64) -> DecodeResult<Vec<T>> {
    let records = decode_indexed_family_with_count(raw, count, T::ITEM_SCHEMA)?;
    records
        .iter()
        .zip(0u64..)
        .map(|(record, index)| {
            T::from_item(index, record).map_err(|e| DecodeError::InconsistentIndexedFamily {
                family: T::ITEM_SCHEMA.name,
                index,
                source: Box::new(e),
            })
        })
        .collect()
}
