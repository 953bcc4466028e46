//! Application-call argument encoding.
//!
//! The first argument of every program call is the literal action name;
//! numeric parameters follow as 8-byte big-endian integers.

/// 8-byte big-endian encoding of an integer argument.
pub fn itob(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// `[name, itob(v0), itob(v1), ...]`
pub fn method_args(name: &str, values: &[u64]) -> Vec<Vec<u8>> {
    let mut args = Vec::with_capacity(1 + values.len());
    args.push(name.as_bytes().to_vec());
    args.extend(values.iter().copied().map(itob));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itob() {
        assert_eq!(itob(1), vec![0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(itob(u64::MAX), vec![0xff; 8]);
    }

    #[test]
    fn test_method_args() {
        let args = method_args("u", &[500]);
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], b"u".to_vec());
        assert_eq!(args[1], 500u64.to_be_bytes().to_vec());
        assert_eq!(method_args("s", &[]), vec![b"s".to_vec()]);
    }
}
