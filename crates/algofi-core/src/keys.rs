//! State key encoding.
//!
//! Scalar fields live under short fixed ASCII keys (`"ts"`, `"lt"`, ...).
//! Indexed families store element `i` of a field under `prefix ++ itob(i)`,
//! where `itob` is the 8-byte big-endian encoding of the index. The index
//! suffix is fixed-width, so the prefix of any indexed key is recovered by
//! dropping its last eight bytes and no two `(prefix, index)` pairs collide.

/// Width of the encoded index suffix.
pub const INDEX_WIDTH: usize = 8;

/// Largest indexed family the decoder accepts.
///
/// Program state holds far fewer keys than this; a larger count means the
/// count field itself is corrupt.
pub const MAX_FAMILY_SIZE: u64 = 256;

/// Encode `prefix ++ itob(index)`.
pub fn encode_indexed_key(prefix: &str, index: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + INDEX_WIDTH);
    key.extend_from_slice(prefix.as_bytes());
    key.extend_from_slice(&index.to_be_bytes());
    key
}

/// Split an indexed key into its prefix and index.
///
/// Returns `None` for keys too short to carry an index or whose prefix does
/// not end with the `_` separator every indexed prefix uses.
pub fn split_indexed_key(key: &[u8]) -> Option<(&[u8], u64)> {
    if key.len() <= INDEX_WIDTH {
        return None;
    }
    let (prefix, suffix) = key.split_at(key.len() - INDEX_WIDTH);
    if prefix.last() != Some(&b'_') {
        return None;
    }
    let index = u64::from_be_bytes(suffix.try_into().ok()?);
    Some((prefix, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode_indexed_key() {
        let key = encode_indexed_key("rai_", 1);
        assert_eq!(key, b"rai_\x00\x00\x00\x00\x00\x00\x00\x01".to_vec());
    }

    #[test]
    fn test_split_indexed_key() {
        let key = encode_indexed_key("urpc_", 42);
        assert_eq!(split_indexed_key(&key), Some((&b"urpc_"[..], 42)));
        assert_eq!(split_indexed_key(b"ts"), None);
        assert_eq!(split_indexed_key(b"rpc"), None);
    }

    #[test]
    fn test_no_collisions_across_prefixes() {
        let prefixes = ["rpc_", "rai_", "rps_", "rc_", "ri_", "rp_", "urpc_", "urc_", "uur_"];
        let mut seen = HashSet::new();
        for prefix in prefixes {
            for index in 0..MAX_FAMILY_SIZE {
                assert!(
                    seen.insert(encode_indexed_key(prefix, index)),
                    "collision for {prefix}{index}"
                );
            }
        }
    }

    #[test]
    fn test_scalar_key_never_matches_indexed_key() {
        // "rpc" (count) and "rpc_" (per-program counter) must stay distinct.
        for index in 0..MAX_FAMILY_SIZE {
            assert_ne!(encode_indexed_key("rpc_", index), b"rpc".to_vec());
        }
    }
}
