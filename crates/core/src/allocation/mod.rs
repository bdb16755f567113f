//! Allocation normalization: percentages and dollar values per category,
//! given exclusions and overrides.

mod allocation_calculator;
mod allocation_model;
mod allocation_overrides;
mod exclusions;

pub use allocation_calculator::*;
pub use allocation_model::*;
pub use allocation_overrides::*;
pub use exclusions::ExcludedCategories;
