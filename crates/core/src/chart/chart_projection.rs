use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::allocation::ProcessedAssetCategory;
use crate::rebalance::RebalanceData;

use super::{ArcSegment, ChartDataPoint};

/// Chart points for the included categories, in input order.
pub fn project_chart_data(processed: &[ProcessedAssetCategory]) -> Vec<ChartDataPoint> {
    processed
        .iter()
        .filter(|c| !c.is_excluded)
        .map(|c| chart_point(c, None))
        .collect()
}

/// Chart points for every category. Excluded ones are flagged and carry their
/// (zero) active percentage.
pub fn project_chart_data_with_excluded(
    processed: &[ProcessedAssetCategory],
) -> Vec<ChartDataPoint> {
    processed
        .iter()
        .map(|c| chart_point(c, Some(c.is_excluded)))
        .collect()
}

/// Chart points for the target side of a rebalance, excluded categories removed.
pub fn project_target_chart_data(rebalance: &RebalanceData) -> Vec<ChartDataPoint> {
    project_chart_data(&rebalance.target)
}

/// Lays chart points out along a ring of the given circumference.
///
/// Negative, non-finite or unrepresentable values get a zero-length segment.
pub fn project_arc_segments(points: &[ChartDataPoint], circumference: f64) -> Vec<ArcSegment> {
    let circumference = if circumference.is_finite() && circumference > 0.0 {
        circumference
    } else {
        0.0
    };

    let mut offset = 0.0;
    points
        .iter()
        .map(|point| {
            let value = point
                .value
                .to_f64()
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(0.0);
            let arc_length = value / 100.0 * circumference;
            let segment = ArcSegment {
                id: point.id.clone(),
                label: point.name.clone(),
                value,
                color: point.color.clone(),
                arc_length,
                offset,
                is_excluded: point.is_excluded,
            };
            offset += arc_length;
            segment
        })
        .collect()
}

fn chart_point(category: &ProcessedAssetCategory, is_excluded: Option<bool>) -> ChartDataPoint {
    ChartDataPoint {
        id: category.id().to_string(),
        name: category.name().to_string(),
        value: if category.is_excluded {
            Decimal::ZERO
        } else {
            category.active_allocation_percentage
        },
        color: category.color().to_string(),
        is_excluded,
    }
}
