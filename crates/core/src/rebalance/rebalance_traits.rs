use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::allocation::ProcessedAssetCategory;

/// Produces a target allocation for the current portfolio.
///
/// Returns one target percentage of the whole portfolio per category id it has
/// an opinion on. Ids left out are dropped from the rebalance plan.
pub trait TargetAllocationSource: Send {
    fn target_allocations(
        &mut self,
        current: &[ProcessedAssetCategory],
    ) -> HashMap<String, Decimal>;
}
