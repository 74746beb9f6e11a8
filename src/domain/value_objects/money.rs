//! Amounts are stored as integer minor units (paise) and percentages as basis
//! points; the domain works in `Decimal`.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

pub const MINOR_UNIT_SCALE: u32 = 2;
pub const CURRENCY_SYMBOL: &str = "₹";

pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNIT_SCALE)
}

pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    round_to_scale(amount)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

pub fn from_basis_points(basis_points: i32) -> Decimal {
    Decimal::new(basis_points.into(), MINOR_UNIT_SCALE)
}

pub fn to_basis_points(percentage: Decimal) -> Option<i32> {
    round_to_scale(percentage)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i32()
}

pub fn round_to_scale(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole rupees with Indian digit grouping, e.g. `₹1,00,000`.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();

    format!("{sign}{CURRENCY_SYMBOL}{}", group_indian(&digits))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn minor_units_round_trip_through_decimal() {
        assert_eq!(from_minor_units(149_900), dec!(1499));
        assert_eq!(to_minor_units(dec!(1499)), Some(149_900));
        assert_eq!(to_minor_units(dec!(10.005)), Some(1001));
        assert_eq!(to_minor_units(dec!(9180.004)), Some(918_000));
    }

    #[test]
    fn basis_points() {
        assert_eq!(from_basis_points(2350), dec!(23.5));
        assert_eq!(to_basis_points(dec!(12.345)), Some(1235));
        assert_eq!(to_basis_points(dec!(100)), Some(10_000));
    }

    #[test]
    fn out_of_range_amounts_have_no_minor_units() {
        assert_eq!(to_minor_units(Decimal::MAX), None);
        assert_eq!(to_minor_units(dec!(100000000000000000)), None);
        assert_eq!(to_basis_points(Decimal::MAX), None);
    }

    #[test]
    fn formats_with_indian_grouping() {
        assert_eq!(format_price(dec!(0)), "₹0");
        assert_eq!(format_price(dec!(999)), "₹999");
        assert_eq!(format_price(dec!(1000)), "₹1,000");
        assert_eq!(format_price(dec!(12000)), "₹12,000");
        assert_eq!(format_price(dec!(100000)), "₹1,00,000");
        assert_eq!(format_price(dec!(12345678.5)), "₹1,23,45,679");
        assert_eq!(format_price(dec!(-2500)), "-₹2,500");
    }
}
