//! Fixed-point amount helpers.
//!
//! All balances and movement values are decimals at scale 2. Callers may
//! submit amounts at any precision; the service boundary normalizes them with
//! [`scale2`] before any arithmetic or persistence.

use rust_decimal::Decimal;

/// Decimal places carried by every persisted balance and movement value.
pub const SCALE: u32 = 2;

/// Normalize an amount to scale 2 (banker's rounding).
pub fn scale2(value: Decimal) -> Decimal {
    value.round_dp(SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_two_decimal_places() {
        let value: Decimal = "10.005".parse().unwrap();
        assert_eq!(scale2(value).to_string(), "10.00");

        let value: Decimal = "10.015".parse().unwrap();
        assert_eq!(scale2(value).to_string(), "10.02");

        let value: Decimal = "1000".parse().unwrap();
        assert_eq!(scale2(value), value);
    }
}
