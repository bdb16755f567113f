//! Allocation models derived from the category list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::categories::AssetCategory;
use crate::chart::ChartDataPoint;

/// Category id -> target percentage of the whole portfolio. May be partial.
pub type AllocationOverrides = HashMap<String, Decimal>;

/// An asset category with its computed allocation.
///
/// Recomputed on every input change; it has no identity beyond the category id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedAssetCategory {
    #[serde(flatten)]
    pub category: AssetCategory,
    /// Whether the user removed this category from the active set
    pub is_excluded: bool,
    /// Share of the entire portfolio (0-100), independent of exclusion
    pub total_allocation_percentage: Decimal,
    /// Share among the non-excluded categories (0-100). Zero when excluded.
    pub active_allocation_percentage: Decimal,
    /// Dollar value of `total_allocation_percentage`
    pub total_value: Decimal,
}

impl ProcessedAssetCategory {
    pub fn id(&self) -> &str {
        &self.category.id
    }

    pub fn name(&self) -> &str {
        &self.category.name
    }

    pub fn color(&self) -> &str {
        &self.category.color
    }
}

/// Output of the allocation normalizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// Every input category, in input order
    pub processed_categories: Vec<ProcessedAssetCategory>,
    /// One point per included category
    pub chart_data: Vec<ChartDataPoint>,
}

impl AllocationResult {
    /// Categories that are not excluded.
    pub fn included(&self) -> impl Iterator<Item = &ProcessedAssetCategory> {
        self.processed_categories.iter().filter(|c| !c.is_excluded)
    }
}
