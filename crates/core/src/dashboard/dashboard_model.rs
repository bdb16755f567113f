//! Dashboard view models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::ProcessedAssetCategory;
use crate::chart::ChartDataPoint;
use crate::rebalance::RebalanceData;
use crate::utils::decimal_utils::weighted_average;

/// Headline numbers for the allocation card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of every category's dollar value
    pub total_value: Decimal,
    /// Sum of the included categories' dollar value
    pub included_value: Decimal,
    pub included_count: usize,
    pub excluded_count: usize,
    /// Value-weighted APY of the included categories, if any reports one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weighted_apy: Option<Decimal>,
}

impl PortfolioSummary {
    pub fn from_categories(categories: &[ProcessedAssetCategory]) -> Self {
        let mut summary = Self::default();
        let mut apy_weights: Vec<(Decimal, Decimal)> = Vec::new();

        for category in categories {
            summary.total_value = summary.total_value.saturating_add(category.total_value);
            if category.is_excluded {
                summary.excluded_count += 1;
                continue;
            }
            summary.included_count += 1;
            summary.included_value = summary.included_value.saturating_add(category.total_value);

            if let Some(apy) = category.category.weighted_apy() {
                apy_weights.push((apy, category.total_value));
            }
        }

        summary.weighted_apy = weighted_average(&apy_weights);
        summary
    }
}

/// Everything the allocation screen renders, derived from the dashboard inputs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub processed_categories: Vec<ProcessedAssetCategory>,
    pub chart_data: Vec<ChartDataPoint>,
    /// Present only in rebalance mode
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rebalance_data: Option<RebalanceData>,
    /// Target side of the rebalance, excluded categories removed. Empty outside rebalance mode.
    pub target_chart_data: Vec<ChartDataPoint>,
    pub summary: PortfolioSummary,
}

impl DashboardView {
    /// Categories that are not excluded, cloned for hand-off to a zap action.
    pub fn included_categories(&self) -> Vec<ProcessedAssetCategory> {
        self.processed_categories
            .iter()
            .filter(|c| !c.is_excluded)
            .cloned()
            .collect()
    }
}
