use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::allocation::{apply_active_allocations, percentage_of, ProcessedAssetCategory};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, FULL_ALLOCATION};
use crate::settings::AllocationSettings;
use crate::utils::decimal_utils::{mul_div, saturating_sum};

use super::{CategoryShift, RebalanceData, ShiftAction, TargetAllocationSource};

/// Turns a processed allocation into a rebalance plan.
///
/// The target comes from a pluggable [`TargetAllocationSource`]; the planner
/// only sizes and classifies the difference.
pub struct RebalancePlanner {
    source: Box<dyn TargetAllocationSource>,
    maintain_threshold: Decimal,
    dollar_per_percentage_point: Decimal,
    default_portfolio_value: Decimal,
}

impl RebalancePlanner {
    pub fn new(source: Box<dyn TargetAllocationSource>, settings: &AllocationSettings) -> Self {
        Self {
            source,
            maintain_threshold: settings.maintain_threshold,
            dollar_per_percentage_point: settings.dollar_per_percentage_point,
            default_portfolio_value: settings.default_portfolio_value,
        }
    }

    /// Plans a rebalance, inferring the portfolio value from the current rows.
    pub fn plan(&mut self, current: &[ProcessedAssetCategory]) -> RebalanceData {
        let portfolio_value = implied_portfolio_value(current, self.default_portfolio_value);
        self.plan_with_portfolio_value(current, portfolio_value)
    }

    /// Plans a rebalance for a portfolio of known dollar value.
    pub fn plan_with_portfolio_value(
        &mut self,
        current: &[ProcessedAssetCategory],
        portfolio_value: Decimal,
    ) -> RebalanceData {
        if current.is_empty() {
            return RebalanceData::default();
        }

        let targets = self.source.target_allocations(current);
        let target = build_target_categories(current, &targets, portfolio_value);
        let shifts = compute_category_shifts(current, &target, self.maintain_threshold);
        let total_rebalance_value =
            total_rebalance_value(&shifts, self.dollar_per_percentage_point);

        debug!(
            "Planned rebalance over {} categories: {} shifts, total value {}",
            current.len(),
            shifts.len(),
            total_rebalance_value
        );

        RebalanceData {
            current: current.to_vec(),
            target,
            shifts,
            total_rebalance_value,
        }
    }
}

/// Target rows: the current rows with their portfolio share replaced by the
/// target (clamped to 0-100), values and active shares recomputed.
///
/// Rows without a target are left out.
pub fn build_target_categories(
    current: &[ProcessedAssetCategory],
    targets: &HashMap<String, Decimal>,
    portfolio_value: Decimal,
) -> Vec<ProcessedAssetCategory> {
    let mut rows: Vec<ProcessedAssetCategory> = current
        .iter()
        .filter_map(|row| {
            let Some(target) = targets.get(row.id()) else {
                warn!(
                    "No target allocation for category '{}'; it is left out of the rebalance",
                    row.id()
                );
                return None;
            };
            let total_allocation_percentage = (*target).clamp(Decimal::ZERO, FULL_ALLOCATION);
            Some(ProcessedAssetCategory {
                total_allocation_percentage,
                total_value: percentage_of(total_allocation_percentage, portfolio_value),
                active_allocation_percentage: Decimal::ZERO,
                ..row.clone()
            })
        })
        .collect();

    apply_active_allocations(&mut rows);
    rows
}

/// One shift per current row that has a matching target row (by id).
pub fn compute_category_shifts(
    current: &[ProcessedAssetCategory],
    target: &[ProcessedAssetCategory],
    maintain_threshold: Decimal,
) -> Vec<CategoryShift> {
    let target_by_id: HashMap<&str, &ProcessedAssetCategory> =
        target.iter().map(|row| (row.id(), row)).collect();

    current
        .iter()
        .filter_map(|row| {
            let target_row = target_by_id.get(row.id())?;
            Some(category_shift(
                row,
                target_row.total_allocation_percentage,
                maintain_threshold,
            ))
        })
        .collect()
}

/// Builds the shift for one category.
pub fn category_shift(
    current: &ProcessedAssetCategory,
    target_percentage: Decimal,
    maintain_threshold: Decimal,
) -> CategoryShift {
    let current_percentage = current.total_allocation_percentage;
    let change_amount = target_percentage.saturating_sub(current_percentage);
    let change_percentage = if current_percentage > Decimal::ZERO {
        mul_div(change_amount, FULL_ALLOCATION, current_percentage)
    } else {
        Decimal::ZERO
    };
    let action = classify_shift(change_amount, maintain_threshold);

    CategoryShift {
        category_id: current.id().to_string(),
        category_name: current.name().to_string(),
        current_percentage,
        target_percentage,
        change_amount,
        change_percentage,
        action,
        action_description: describe_shift(current.name(), action, change_amount),
    }
}

/// Maintain when the change is within the threshold (inclusive), otherwise
/// increase or decrease by sign.
pub fn classify_shift(change_amount: Decimal, maintain_threshold: Decimal) -> ShiftAction {
    if change_amount.abs() <= maintain_threshold {
        ShiftAction::Maintain
    } else if change_amount > Decimal::ZERO {
        ShiftAction::Increase
    } else {
        ShiftAction::Decrease
    }
}

/// Sum of absolute changes, in dollars. Saturates at `Decimal::MAX`.
pub fn total_rebalance_value(
    shifts: &[CategoryShift],
    dollar_per_percentage_point: Decimal,
) -> Decimal {
    let points = saturating_sum(shifts.iter().map(|s| s.change_amount.abs()));
    points.saturating_mul(dollar_per_percentage_point)
}

/// Portfolio value implied by the rows' dollar values and portfolio shares.
///
/// Falls back to `fallback` when the rows carry no allocation.
pub fn implied_portfolio_value(rows: &[ProcessedAssetCategory], fallback: Decimal) -> Decimal {
    let percentage = saturating_sum(rows.iter().map(|r| r.total_allocation_percentage));
    if percentage <= Decimal::ZERO {
        return fallback;
    }
    let value = saturating_sum(rows.iter().map(|r| r.total_value));
    mul_div(value, FULL_ALLOCATION, percentage)
}

fn describe_shift(name: &str, action: ShiftAction, change_amount: Decimal) -> String {
    let points = change_amount.abs().round_dp(DISPLAY_DECIMAL_PRECISION);
    match action {
        ShiftAction::Increase => format!("Increase {} by {}%", name, points),
        ShiftAction::Decrease => format!("Decrease {} by {}%", name, points),
        ShiftAction::Maintain => format!("Maintain {} allocation", name),
    }
}
