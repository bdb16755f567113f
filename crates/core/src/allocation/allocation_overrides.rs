//! Optional pre-passes over user supplied allocation overrides.
//!
//! The normalizer accepts overrides as-is. These helpers are for callers that
//! want the inputs to add up to 100 before they get there.

use log::debug;
use rust_decimal::Decimal;

use crate::constants::FULL_ALLOCATION;
use crate::utils::decimal_utils::{mul_div, saturating_sum};

use super::AllocationOverrides;

/// Scales overrides so they sum to exactly 100.
///
/// Negative values are clamped to zero first. A map that sums to zero is
/// returned clamped but unscaled.
pub fn normalize_overrides(overrides: &AllocationOverrides) -> AllocationOverrides {
    let clamped: AllocationOverrides = overrides
        .iter()
        .map(|(id, value)| (id.clone(), (*value).max(Decimal::ZERO)))
        .collect();

    let total = saturating_sum(clamped.values().copied());
    if total.is_zero() {
        return clamped;
    }

    clamped
        .into_iter()
        .map(|(id, value)| (id, mul_div(value, FULL_ALLOCATION, total)))
        .collect()
}

/// Moves one allocation slider and rebalances the others around it.
///
/// `current` holds the percentage each category shows right now. `changed_id`
/// is set to `new_value` (clamped to 0-100) and the remaining budget is spread
/// over the other `category_ids` in proportion to their current values, or
/// equally when they are all zero. Ids outside `category_ids` are dropped.
pub fn adjust_override(
    current: &AllocationOverrides,
    category_ids: &[String],
    changed_id: &str,
    new_value: Decimal,
) -> AllocationOverrides {
    let mut adjusted = AllocationOverrides::new();

    if !category_ids.iter().any(|id| id == changed_id) {
        debug!("Slider change for unknown category '{}' ignored", changed_id);
        for id in category_ids {
            if let Some(value) = current.get(id) {
                adjusted.insert(id.clone(), *value);
            }
        }
        return adjusted;
    }

    let new_value = new_value.clamp(Decimal::ZERO, FULL_ALLOCATION);
    adjusted.insert(changed_id.to_string(), new_value);

    let others: Vec<&String> = category_ids
        .iter()
        .filter(|id| id.as_str() != changed_id)
        .collect();
    if others.is_empty() {
        return adjusted;
    }

    let remaining = FULL_ALLOCATION - new_value;
    let previous = |id: &str| {
        current
            .get(id)
            .copied()
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    };
    let previous_total = saturating_sum(others.iter().map(|id| previous(id.as_str())));
    let other_count = Decimal::from(others.len());

    for id in others {
        let share = if previous_total > Decimal::ZERO {
            mul_div(previous(id.as_str()), remaining, previous_total)
        } else {
            remaining / other_count
        };
        adjusted.insert(id.clone(), share);
    }

    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn map(entries: &[(&str, Decimal)]) -> AllocationOverrides {
        entries
            .iter()
            .map(|(id, value)| (id.to_string(), *value))
            .collect()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_scales_to_100() {
        let normalized = normalize_overrides(&map(&[("a", dec!(60)), ("b", dec!(60))]));
        assert_eq!(normalized["a"], dec!(50));
        assert_eq!(normalized["b"], dec!(50));
    }

    #[test]
    fn test_normalize_clamps_negative_values() {
        let normalized = normalize_overrides(&map(&[("a", dec!(-10)), ("b", dec!(20))]));
        assert_eq!(normalized["a"], dec!(0));
        assert_eq!(normalized["b"], dec!(100));
    }

    #[test]
    fn test_normalize_zero_sum_is_left_alone() {
        let normalized = normalize_overrides(&map(&[("a", dec!(0)), ("b", dec!(-5))]));
        assert_eq!(normalized["a"], dec!(0));
        assert_eq!(normalized["b"], dec!(0));
        assert!(normalize_overrides(&AllocationOverrides::new()).is_empty());
    }

    #[test]
    fn test_normalize_huge_values() {
        let normalized = normalize_overrides(&map(&[("a", Decimal::MAX), ("b", Decimal::MAX)]));
        assert_eq!(normalized.len(), 2);
        assert!(normalized.values().all(|v| *v > Decimal::ZERO && *v <= dec!(100)));

        let huge = dec!(1000000000000000000000);
        let normalized = normalize_overrides(&map(&[("a", huge), ("b", huge)]));
        assert_eq!(normalized["a"], dec!(50));
    }

    #[test]
    fn test_adjust_redistributes_proportionally() {
        let current = map(&[("btc", dec!(40)), ("eth", dec!(40)), ("stablecoins", dec!(20))]);
        let adjusted = adjust_override(
            &current,
            &ids(&["btc", "eth", "stablecoins"]),
            "btc",
            dec!(70),
        );
        assert_eq!(adjusted["btc"], dec!(70));
        assert_eq!(adjusted["eth"], dec!(20));
        assert_eq!(adjusted["stablecoins"], dec!(10));
        let total: Decimal = adjusted.values().copied().sum();
        assert_eq!(total, dec!(100));
    }

    #[test]
    fn test_adjust_splits_equally_when_others_are_zero() {
        let current = map(&[("btc", dec!(100))]);
        let adjusted = adjust_override(
            &current,
            &ids(&["btc", "eth", "stablecoins"]),
            "btc",
            dec!(40),
        );
        assert_eq!(adjusted["eth"], dec!(30));
        assert_eq!(adjusted["stablecoins"], dec!(30));
    }

    #[test]
    fn test_adjust_clamps_new_value() {
        let current = map(&[("a", dec!(50)), ("b", dec!(50))]);
        let adjusted = adjust_override(&current, &ids(&["a", "b"]), "a", dec!(150));
        assert_eq!(adjusted["a"], dec!(100));
        assert_eq!(adjusted["b"], dec!(0));
    }

    #[test]
    fn test_adjust_single_category() {
        let adjusted = adjust_override(&AllocationOverrides::new(), &ids(&["a"]), "a", dec!(80));
        assert_eq!(adjusted.len(), 1);
        assert_eq!(adjusted["a"], dec!(80));
    }

    #[test]
    fn test_adjust_unknown_id_keeps_listed_values() {
        let current = map(&[("a", dec!(50)), ("b", dec!(50)), ("gone", dec!(10))]);
        let adjusted = adjust_override(&current, &ids(&["a", "b"]), "zzz", dec!(10));
        assert_eq!(adjusted, map(&[("a", dec!(50)), ("b", dec!(50))]));
    }
}
