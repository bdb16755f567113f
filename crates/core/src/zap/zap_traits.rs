use async_trait::async_trait;

use crate::dashboard::DashboardView;
use crate::errors::Result;

use super::{OperationMode, PortfolioSwapAction, SwapSettings, ValidationResult};

/// Receives confirmed zap actions. Implemented by whatever submits transactions.
#[async_trait]
pub trait ZapActionHandler: Send + Sync {
    async fn on_zap_action(&self, action: PortfolioSwapAction) -> Result<()>;
}

/// Trait for the zap service.
#[async_trait]
pub trait ZapServiceTrait: Send + Sync {
    /// Checks the swap form against the current view without side effects.
    fn validate(
        &self,
        mode: OperationMode,
        swap_settings: &SwapSettings,
        view: &DashboardView,
    ) -> ValidationResult;

    /// Validates, builds the action and hands it to the handler.
    async fn submit(
        &self,
        mode: OperationMode,
        swap_settings: SwapSettings,
        view: &DashboardView,
    ) -> Result<PortfolioSwapAction>;
}
