//! Yieldfolio Core - allocation, rebalance planning and zap actions.
//!
//! This crate holds the business logic behind the portfolio allocation
//! dashboard. It is pure and synchronous apart from the zap hand-off, and
//! knows nothing about wallets, networks or rendering: those collaborators
//! feed it plain data and receive plain data back.

pub mod allocation;
pub mod categories;
pub mod chart;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod rebalance;
pub mod settings;
pub mod utils;
pub mod zap;

// Re-export the pipeline types
pub use allocation::*;
pub use categories::*;
pub use chart::*;
pub use rebalance::*;

pub use dashboard::{DashboardView, PortfolioDashboard, PortfolioSummary};
pub use settings::AllocationSettings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
