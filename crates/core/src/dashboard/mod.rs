//! Dashboard state: owns the user's inputs and recomputes the derived view.

mod dashboard_model;
mod dashboard_state;

pub use dashboard_model::*;
pub use dashboard_state::PortfolioDashboard;
