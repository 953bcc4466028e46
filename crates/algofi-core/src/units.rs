//! Base-unit conversions.

use rust_decimal::Decimal;

/// Ledger limit on asset decimals.
pub const MAX_ASSET_DECIMALS: u8 = 19;

/// Convert an integer amount of base units to whole-token units, exactly.
///
/// `from_base_units(1_500_000, 6) == 1.5`
pub fn from_base_units(amount: u64, decimals: u8) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(amount), u32::from(decimals.min(MAX_ASSET_DECIMALS)))
}

/// One whole token expressed in base units (`10^decimals`).
pub fn one_unit(decimals: u8) -> u64 {
    10u64.pow(u32::from(decimals.min(MAX_ASSET_DECIMALS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_base_units() {
        assert_eq!(from_base_units(1_500_000, 6), dec!(1.5));
        assert_eq!(from_base_units(1, 0), dec!(1));
        assert_eq!(from_base_units(0, 8), Decimal::ZERO);
    }

    #[test]
    fn test_one_unit() {
        assert_eq!(one_unit(6), 1_000_000);
        assert_eq!(one_unit(0), 1);
        assert_eq!(one_unit(19), 10_000_000_000_000_000_000);
    }
}
