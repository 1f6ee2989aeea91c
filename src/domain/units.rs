//! Base-unit to decimal rendering

use alloy::primitives::U256;

/// Native coin decimals (wei per ether)
pub const NATIVE_DECIMALS: u8 = 18;

/// Largest decimals whose scale factor (10^77) still fits in a U256
pub const MAX_DECIMALS: u8 = 77;

/// An integer amount of base units together with its decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    pub fn native(wei: U256) -> Self {
        Self::new(wei, NATIVE_DECIMALS)
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_units(self.raw, self.decimals))
    }
}

/// Format a base-unit value as `whole.fraction`.
///
/// Trailing zeros of the fraction are dropped but one digit always remains,
/// so `1_500_000` with 6 decimals renders as `1.5` and zero as `0.0`.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return format!("{}.0", value);
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let frac = value % divisor;

    let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let trimmed = frac_str.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        let one_and_half = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(format_units(one_and_half, 18), "1.5");
        assert_eq!(format_units(U256::ZERO, 18), "0.0");
        assert_eq!(format_units(U256::from(12_000_000u64), 6), "12.0");
        assert_eq!(format_units(U256::from(1u64), 6), "0.000001");
        assert_eq!(format_units(U256::from(7u64), 0), "7.0");
    }

    #[test]
    fn test_format_units_large() {
        // 1e30 wei
        let big = U256::from(10u64).pow(U256::from(30u64));
        assert_eq!(format_units(big, 18), "1000000000000.0");
    }

    #[test]
    fn test_max_decimals_scale_fits() {
        let scale = U256::from(10u64).pow(U256::from(MAX_DECIMALS));
        let (_, overflowed) = scale.overflowing_mul(U256::from(10u64));
        assert!(overflowed);
        assert_eq!(format_units(scale, MAX_DECIMALS), "1.0");
    }

    #[test]
    fn test_amount_display() {
        let amount = Amount::new(U256::from(2_500_000u64), 6);
        assert_eq!(amount.to_string(), "2.5");
        assert!(!amount.is_zero());
        assert!(Amount::native(U256::ZERO).is_zero());
    }
}
