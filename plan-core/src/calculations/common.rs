//! Shared helpers for projection and analysis arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Rounds to `dp` decimal places, with midpoints rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use plan_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2.45), 1), dec!(2.5));
/// assert_eq!(round_half_up(dec!(2.44), 1), dec!(2.4));
/// assert_eq!(round_half_up(dec!(-2.45), 1), dec!(-2.5));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Drops the fractional part and converts to `i64`, saturating at the
/// `i64` bounds.
pub fn truncate_to_i64(value: Decimal) -> i64 {
    value.trunc().to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Formats an amount with `,` thousands separators.
///
/// # Examples
///
/// ```
/// use plan_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(1234567), "1,234,567");
/// assert_eq!(format_amount(-950), "-950");
/// ```
pub fn format_amount(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
