//! Zap domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::ProcessedAssetCategory;
use crate::rebalance::RebalanceData;

/// What the user is asking the portfolio to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationMode {
    /// Deposit a single token and spread it across the included categories
    ZapIn,
    /// Withdraw from the included categories into a single token
    ZapOut,
    /// Move value between categories toward the target allocation
    Rebalance,
}

impl OperationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationMode::ZapIn => "zapIn",
            OperationMode::ZapOut => "zapOut",
            OperationMode::Rebalance => "rebalance",
        }
    }

    /// Whether the mode moves funds through a user selected token.
    pub fn requires_token(&self) -> bool {
        matches!(self, OperationMode::ZapIn | OperationMode::ZapOut)
    }
}

impl std::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Swap form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapSettings {
    /// Amount of `token` to zap in or out (ignored for rebalance)
    pub amount: Decimal,
    /// Maximum accepted slippage, in percent
    pub slippage_tolerance: Decimal,
    /// Selected token symbol
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token: Option<String>,
}

/// Advisory result of validating the swap form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn from_messages(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// The confirmed action handed to the transaction collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSwapAction {
    pub operation_mode: OperationMode,
    pub included_categories: Vec<ProcessedAssetCategory>,
    pub swap_settings: SwapSettings,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rebalance_data: Option<RebalanceData>,
}
