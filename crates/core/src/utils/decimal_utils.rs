//! Overflow-safe decimal helpers.
//!
//! Allocation inputs have no upper bound, so products of percentages and
//! dollar values can exceed the `Decimal` range. These helpers saturate at
//! `Decimal::MAX` / `Decimal::MIN` instead of panicking.

use rust_decimal::Decimal;

/// Sum that saturates instead of overflowing.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}

/// Computes `a * b / c` without panicking.
///
/// The exact product is used when it fits. Otherwise the larger operand is
/// divided by `c` first, which keeps the intermediate small. If the result
/// itself is out of range it saturates with the sign of the exact result.
/// A zero divisor yields zero.
///
/// # Arguments
/// * `a`, `b` - The factors
/// * `c` - The divisor
pub fn mul_div(a: Decimal, b: Decimal, c: Decimal) -> Decimal {
    if c.is_zero() || a.is_zero() || b.is_zero() {
        return Decimal::ZERO;
    }

    if let Some(result) = a.checked_mul(b).and_then(|product| product.checked_div(c)) {
        return result;
    }

    let (large, small) = if a.abs() >= b.abs() { (a, b) } else { (b, a) };
    large
        .checked_div(c)
        .and_then(|quotient| quotient.checked_mul(small))
        .unwrap_or_else(|| {
            let negative =
                a.is_sign_negative() ^ b.is_sign_negative() ^ c.is_sign_negative();
            if negative {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
}

/// Weighted mean of `(value, weight)` pairs.
///
/// Each term is scaled by its weight's share before summing, so large weights
/// do not overflow. Returns `None` when the weights sum to zero or less.
pub fn weighted_average(pairs: &[(Decimal, Decimal)]) -> Option<Decimal> {
    let total_weight = saturating_sum(pairs.iter().map(|(_, weight)| *weight));
    if total_weight <= Decimal::ZERO {
        return None;
    }
    Some(saturating_sum(
        pairs
            .iter()
            .map(|(value, weight)| mul_div(*value, *weight, total_weight)),
    ))
}
