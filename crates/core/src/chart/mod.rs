//! Chart-ready projections of allocation and rebalance output.

mod chart_model;
mod chart_projection;

pub use chart_model::*;
pub use chart_projection::*;
