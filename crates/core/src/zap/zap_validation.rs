use rust_decimal::Decimal;

use crate::constants::FULL_ALLOCATION;
use crate::rebalance::RebalanceData;

use super::{OperationMode, SwapSettings, ValidationResult};

/// Validates the swap form.
///
/// Errors block submission; warnings are shown to the user but do not.
///
/// # Arguments
///
/// * `mode` - The requested operation.
/// * `swap_settings` - Form values.
/// * `included_count` - Number of categories in the active set.
/// * `rebalance` - The current plan, if rebalance mode produced one.
/// * `slippage_warning_threshold` - Slippage (percent) above which a warning is added.
pub fn validate_swap_settings(
    mode: OperationMode,
    swap_settings: &SwapSettings,
    included_count: usize,
    rebalance: Option<&RebalanceData>,
    slippage_warning_threshold: Decimal,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if included_count == 0 {
        errors.push("Select at least one category".to_string());
    }

    if mode.requires_token() {
        if swap_settings.amount <= Decimal::ZERO {
            errors.push("Amount must be greater than zero".to_string());
        }
        let has_token = swap_settings
            .token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty());
        if !has_token {
            errors.push(format!("Please select a token for {}", mode));
        }
    }

    if mode == OperationMode::Rebalance {
        match rebalance {
            None => errors.push("No rebalance plan available".to_string()),
            Some(plan) if plan.actionable_shifts().next().is_none() => {
                warnings.push("Portfolio is already close to its target allocation".to_string())
            }
            Some(_) => {}
        }
    }

    let slippage = swap_settings.slippage_tolerance;
    if slippage < Decimal::ZERO || slippage > FULL_ALLOCATION {
        errors.push("Slippage tolerance must be between 0 and 100%".to_string());
    } else if slippage > slippage_warning_threshold {
        warnings.push(format!(
            "High slippage tolerance ({}%) may result in an unfavorable trade",
            slippage
        ));
    }

    ValidationResult::from_messages(errors, warnings)
}
