//! Rebalance planning: target allocations, per-category shifts and the
//! dollar size of a rebalance.

mod rebalance_model;
mod rebalance_planner;
mod rebalance_policy;
mod rebalance_traits;

pub use rebalance_model::*;
pub use rebalance_planner::*;
pub use rebalance_policy::*;
pub use rebalance_traits::TargetAllocationSource;
