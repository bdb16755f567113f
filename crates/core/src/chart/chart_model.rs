use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single slice of the allocation chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub id: String,
    pub name: String,
    /// Active allocation percentage (0-100)
    pub value: Decimal,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_excluded: Option<bool>,
}

/// A donut segment laid out along the ring, in the units of the circumference
/// passed to `project_arc_segments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSegment {
    pub id: String,
    pub label: String,
    /// Percentage of the ring (0-100)
    pub value: f64,
    pub color: String,
    /// Length of the stroke for this segment
    pub arc_length: f64,
    /// Sum of the arc lengths of all preceding segments
    pub offset: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_excluded: Option<bool>,
}
