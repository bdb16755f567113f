//! Zap actions: validating the swap form and handing the confirmed action to
//! the transaction collaborator.

mod zap_model;
mod zap_service;
mod zap_traits;
mod zap_validation;

pub use zap_model::*;
pub use zap_service::ZapService;
pub use zap_traits::{ZapActionHandler, ZapServiceTrait};
pub use zap_validation::validate_swap_settings;
