//! Tunable settings for the allocation pipeline.

mod settings_model;

pub use settings_model::*;
