use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::dashboard::DashboardView;
use crate::errors::{Error, Result, ValidationError};
use crate::settings::AllocationSettings;

use super::zap_traits::{ZapActionHandler, ZapServiceTrait};
use super::{
    validate_swap_settings, OperationMode, PortfolioSwapAction, SwapSettings, ValidationResult,
};

pub struct ZapService {
    handler: Arc<dyn ZapActionHandler>,
    settings: AllocationSettings,
}

impl ZapService {
    pub fn new(handler: Arc<dyn ZapActionHandler>, settings: AllocationSettings) -> Self {
        Self { handler, settings }
    }

    fn build_action(
        mode: OperationMode,
        swap_settings: SwapSettings,
        view: &DashboardView,
    ) -> PortfolioSwapAction {
        let rebalance_data = if mode == OperationMode::Rebalance {
            view.rebalance_data.clone()
        } else {
            None
        };

        PortfolioSwapAction {
            operation_mode: mode,
            included_categories: view.included_categories(),
            swap_settings,
            rebalance_data,
        }
    }
}

#[async_trait]
impl ZapServiceTrait for ZapService {
    fn validate(
        &self,
        mode: OperationMode,
        swap_settings: &SwapSettings,
        view: &DashboardView,
    ) -> ValidationResult {
        validate_swap_settings(
            mode,
            swap_settings,
            view.summary.included_count,
            view.rebalance_data.as_ref(),
            self.settings.slippage_warning_threshold,
        )
    }

    async fn submit(
        &self,
        mode: OperationMode,
        swap_settings: SwapSettings,
        view: &DashboardView,
    ) -> Result<PortfolioSwapAction> {
        let validation = self.validate(mode, &swap_settings, view);
        if !validation.is_valid {
            return Err(Error::Validation(ValidationError::Rejected(
                validation.errors,
            )));
        }
        for warning in &validation.warnings {
            warn!("Submitting {} with warning: {}", mode, warning);
        }

        let action = Self::build_action(mode, swap_settings, view);
        info!(
            "Dispatching {} action over {} categories",
            mode,
            action.included_categories.len()
        );
        self.handler.on_zap_action(action.clone()).await?;
        Ok(action)
    }
}
