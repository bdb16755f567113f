use log::debug;
use rust_decimal::Decimal;

use crate::categories::AssetCategory;
use crate::chart::project_chart_data;
use crate::constants::{DEFAULT_TOTAL_PORTFOLIO_VALUE, FULL_ALLOCATION};
use crate::utils::decimal_utils::{mul_div, saturating_sum};

use super::{AllocationOverrides, AllocationResult, ExcludedCategories, ProcessedAssetCategory};

/// Normalizes raw categories into processed allocations and chart points.
///
/// # Arguments
///
/// * `categories` - The full category list, in display order.
/// * `excluded` - Categories removed from the active set.
/// * `overrides` - Caller supplied percentages of the whole portfolio. Values are
///   clamped at zero but never scaled; a sum other than 100 leaves an unallocated
///   remainder.
/// * `total_portfolio_value` - Dollar value of the portfolio. `None` uses
///   [`DEFAULT_TOTAL_PORTFOLIO_VALUE`].
///
/// Categories without an override share whatever budget the overrides leave
/// (`100 - sum(overrides)`, floored at zero) equally.
pub fn calculate_allocations(
    categories: &[AssetCategory],
    excluded: &ExcludedCategories,
    overrides: &AllocationOverrides,
    total_portfolio_value: Option<Decimal>,
) -> AllocationResult {
    if categories.is_empty() {
        return AllocationResult::default();
    }

    let portfolio_value = total_portfolio_value.unwrap_or(DEFAULT_TOTAL_PORTFOLIO_VALUE);
    let fallback_percentage = fallback_percentage(categories, overrides);

    for id in overrides.keys() {
        if !categories.iter().any(|c| &c.id == id) {
            debug!("Ignoring allocation override for unknown category '{}'", id);
        }
    }

    let mut processed: Vec<ProcessedAssetCategory> = categories
        .iter()
        .map(|category| {
            let total_allocation_percentage = overrides
                .get(&category.id)
                .copied()
                .map(|value| value.max(Decimal::ZERO))
                .unwrap_or(fallback_percentage);

            ProcessedAssetCategory {
                category: category.clone(),
                is_excluded: excluded.is_excluded(&category.id),
                total_allocation_percentage,
                active_allocation_percentage: Decimal::ZERO,
                total_value: percentage_of(total_allocation_percentage, portfolio_value),
            }
        })
        .collect();

    apply_active_allocations(&mut processed);

    debug!(
        "Normalized {} categories ({} excluded, {} overrides) for portfolio value {}",
        processed.len(),
        excluded.len(),
        overrides.len(),
        portfolio_value
    );

    let chart_data = project_chart_data(&processed);
    AllocationResult {
        processed_categories: processed,
        chart_data,
    }
}

/// Recomputes `active_allocation_percentage` for every row from `total_value`.
///
/// Included rows share 100% in proportion to their value; excluded rows get zero.
/// If the included rows hold no value, every row gets zero.
pub fn apply_active_allocations(rows: &mut [ProcessedAssetCategory]) {
    let included_total = saturating_sum(
        rows.iter()
            .filter(|row| !row.is_excluded)
            .map(|row| row.total_value),
    );

    for row in rows.iter_mut() {
        row.active_allocation_percentage = if row.is_excluded || included_total <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            mul_div(row.total_value, FULL_ALLOCATION, included_total)
        };
    }
}

/// Dollar value of `percentage` percent of `portfolio_value`, saturating at
/// `Decimal::MAX`.
pub fn percentage_of(percentage: Decimal, portfolio_value: Decimal) -> Decimal {
    mul_div(percentage, portfolio_value, FULL_ALLOCATION)
}

/// Equal share of the budget left over by overrides, for categories without one.
fn fallback_percentage(categories: &[AssetCategory], overrides: &AllocationOverrides) -> Decimal {
    let uncovered = categories
        .iter()
        .filter(|c| !overrides.contains_key(&c.id))
        .count();
    if uncovered == 0 {
        return Decimal::ZERO;
    }

    let assigned = saturating_sum(
        categories
            .iter()
            .filter_map(|c| overrides.get(&c.id).copied())
            .map(|value| value.max(Decimal::ZERO)),
    );

    (FULL_ALLOCATION - assigned).max(Decimal::ZERO) / Decimal::from(uncovered)
}
