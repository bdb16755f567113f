//! Asset categories and the yield protocols they hold.

mod categories_model;

pub use categories_model::*;
