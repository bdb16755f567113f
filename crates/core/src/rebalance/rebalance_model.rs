//! Rebalance domain models.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::allocation::ProcessedAssetCategory;
use crate::constants::FULL_ALLOCATION;
use crate::errors::{Error, Result};

/// What a rebalance does to one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftAction {
    Increase,
    Decrease,
    Maintain,
}

impl ShiftAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftAction::Increase => "increase",
            ShiftAction::Decrease => "decrease",
            ShiftAction::Maintain => "maintain",
        }
    }
}

impl std::fmt::Display for ShiftAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The change a rebalance applies to a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShift {
    pub category_id: String,
    pub category_name: String,
    pub current_percentage: Decimal,
    pub target_percentage: Decimal,
    /// target - current, in percentage points
    pub change_amount: Decimal,
    /// change_amount relative to current, in percent. Zero when current is zero.
    pub change_percentage: Decimal,
    pub action: ShiftAction,
    pub action_description: String,
}

/// Current allocation, target allocation and the shifts between them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceData {
    pub current: Vec<ProcessedAssetCategory>,
    pub target: Vec<ProcessedAssetCategory>,
    pub shifts: Vec<CategoryShift>,
    /// Sum of |change_amount| times the dollar value of a percentage point
    pub total_rebalance_value: Decimal,
}

impl RebalanceData {
    /// Shifts that actually move money.
    pub fn actionable_shifts(&self) -> impl Iterator<Item = &CategoryShift> {
        self.shifts
            .iter()
            .filter(|s| s.action != ShiftAction::Maintain)
    }
}

/// Coefficients for [`RuleBasedTargetPolicy`](super::RuleBasedTargetPolicy).
///
/// Steps are in percentage points of the whole portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RebalanceRules {
    /// BTC is never reduced below this (default: 15)
    pub btc_floor: Decimal,
    /// ETH is never raised above this (default: 45)
    pub eth_ceiling: Decimal,
    /// Smallest random step applied to BTC and ETH (default: 2)
    pub min_step: Decimal,
    /// Largest random step applied to BTC and ETH (default: 5)
    pub max_step: Decimal,
    /// Fixed reduction applied to stablecoins (default: 5)
    pub stablecoin_step: Decimal,
    /// Other categories move by a random amount within +/- this (default: 2)
    pub variation: Decimal,
}

impl Default for RebalanceRules {
    fn default() -> Self {
        Self {
            btc_floor: dec!(15),
            eth_ceiling: dec!(45),
            min_step: dec!(2),
            max_step: dec!(5),
            stablecoin_step: dec!(5),
            variation: dec!(2),
        }
    }
}

impl RebalanceRules {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("btcFloor", self.btc_floor),
            ("ethCeiling", self.eth_ceiling),
            ("minStep", self.min_step),
            ("maxStep", self.max_step),
            ("stablecoinStep", self.stablecoin_step),
            ("variation", self.variation),
        ];
        for (name, value) in fields {
            if value < Decimal::ZERO || value > FULL_ALLOCATION {
                return Err(Error::InvalidConfigValue(format!(
                    "rebalanceRules.{} must be between 0 and 100 (got {})",
                    name, value
                )));
            }
        }
        if self.min_step > self.max_step {
            return Err(Error::InvalidConfigValue(format!(
                "rebalanceRules.minStep ({}) exceeds maxStep ({})",
                self.min_step, self.max_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_action_serialization() {
        assert_eq!(
            serde_json::to_string(&ShiftAction::Increase).unwrap(),
            r#""increase""#
        );
        let parsed: ShiftAction = serde_json::from_str(r#""maintain""#).unwrap();
        assert_eq!(parsed, ShiftAction::Maintain);
        assert_eq!(ShiftAction::Decrease.to_string(), "decrease");
    }

    #[test]
    fn test_default_rules_are_valid() {
        assert!(RebalanceRules::default().validate().is_ok());
    }

    #[test]
    fn test_rules_reject_inverted_steps() {
        let rules = RebalanceRules {
            min_step: dec!(6),
            ..RebalanceRules::default()
        };
        assert!(matches!(rules.validate(), Err(Error::InvalidConfigValue(_))));
    }

    #[test]
    fn test_rules_reject_out_of_range() {
        let rules = RebalanceRules {
            eth_ceiling: dec!(120),
            ..RebalanceRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_actionable_shifts_skip_maintain() {
        let shift = |id: &str, action| CategoryShift {
            category_id: id.to_string(),
            category_name: id.to_string(),
            current_percentage: dec!(10),
            target_percentage: dec!(10),
            change_amount: dec!(0),
            change_percentage: dec!(0),
            action,
            action_description: String::new(),
        };
        let data = RebalanceData {
            shifts: vec![
                shift("a", ShiftAction::Maintain),
                shift("b", ShiftAction::Increase),
            ],
            ..RebalanceData::default()
        };
        let ids: Vec<&str> = data
            .actionable_shifts()
            .map(|s| s.category_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b"]);
    }
}
