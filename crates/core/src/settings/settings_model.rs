//! Allocation settings model and loaders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{
    DEFAULT_DOLLAR_PER_PERCENTAGE_POINT, DEFAULT_MAINTAIN_THRESHOLD,
    DEFAULT_SLIPPAGE_WARNING_THRESHOLD, DEFAULT_TOTAL_PORTFOLIO_VALUE,
};
use crate::errors::{Error, Result};
use crate::rebalance::RebalanceRules;

/// Environment variable names read by [`AllocationSettings::from_env`].
pub const ENV_DEFAULT_PORTFOLIO_VALUE: &str = "YF_DEFAULT_PORTFOLIO_VALUE";
pub const ENV_MAINTAIN_THRESHOLD: &str = "YF_MAINTAIN_THRESHOLD";
pub const ENV_DOLLAR_PER_PERCENTAGE_POINT: &str = "YF_DOLLAR_PER_PERCENTAGE_POINT";
pub const ENV_SLIPPAGE_WARNING_THRESHOLD: &str = "YF_SLIPPAGE_WARNING_THRESHOLD";

/// Settings for allocation, rebalance sizing and zap validation.
///
/// Every field has a default, so a partial JSON document is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllocationSettings {
    /// Portfolio value used when the caller does not provide one (default: 100000)
    pub default_portfolio_value: Decimal,

    /// Shifts with |change| at or below this (percentage points) are "maintain" (default: 1)
    pub maintain_threshold: Decimal,

    /// Dollar value of one percentage point of rebalance (default: 1000)
    pub dollar_per_percentage_point: Decimal,

    /// Slippage percent above which a zap is flagged with a warning (default: 5)
    pub slippage_warning_threshold: Decimal,

    /// Coefficients for the rule based target policy
    pub rebalance_rules: RebalanceRules,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            default_portfolio_value: DEFAULT_TOTAL_PORTFOLIO_VALUE,
            maintain_threshold: DEFAULT_MAINTAIN_THRESHOLD,
            dollar_per_percentage_point: DEFAULT_DOLLAR_PER_PERCENTAGE_POINT,
            slippage_warning_threshold: DEFAULT_SLIPPAGE_WARNING_THRESHOLD,
            rebalance_rules: RebalanceRules::default(),
        }
    }
}

impl AllocationSettings {
    /// Loads settings from `YF_*` environment variables, reading a `.env` file first if present.
    /// Missing variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Used by `from_env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(ENV_DEFAULT_PORTFOLIO_VALUE) {
            settings.default_portfolio_value = parse_decimal(ENV_DEFAULT_PORTFOLIO_VALUE, &value)?;
        }
        if let Some(value) = lookup(ENV_MAINTAIN_THRESHOLD) {
            settings.maintain_threshold = parse_decimal(ENV_MAINTAIN_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_DOLLAR_PER_PERCENTAGE_POINT) {
            settings.dollar_per_percentage_point =
                parse_decimal(ENV_DOLLAR_PER_PERCENTAGE_POINT, &value)?;
        }
        if let Some(value) = lookup(ENV_SLIPPAGE_WARNING_THRESHOLD) {
            settings.slippage_warning_threshold =
                parse_decimal(ENV_SLIPPAGE_WARNING_THRESHOLD, &value)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Parses a JSON settings document.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("defaultPortfolioValue", self.default_portfolio_value),
            ("maintainThreshold", self.maintain_threshold),
            ("dollarPerPercentagePoint", self.dollar_per_percentage_point),
            ("slippageWarningThreshold", self.slippage_warning_threshold),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(Error::InvalidConfigValue(format!(
                    "{} must not be negative (got {})",
                    name, value
                )));
            }
        }
        self.rebalance_rules.validate()
    }
}

fn parse_decimal(key: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| Error::InvalidConfigValue(format!("{}='{}': {}", key, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = AllocationSettings::default();
        assert_eq!(settings.default_portfolio_value, dec!(100000));
        assert_eq!(settings.maintain_threshold, dec!(1));
        assert_eq!(settings.dollar_per_percentage_point, dec!(1000));
        assert_eq!(settings.slippage_warning_threshold, dec!(5));
    }

    #[test]
    fn test_from_lookup_overrides_only_present_keys() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_MAINTAIN_THRESHOLD, "0.5"),
            (ENV_DEFAULT_PORTFOLIO_VALUE, " 250000 "),
        ]);
        let settings =
            AllocationSettings::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(settings.maintain_threshold, dec!(0.5));
        assert_eq!(settings.default_portfolio_value, dec!(250000));
        assert_eq!(settings.dollar_per_percentage_point, dec!(1000));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result = AllocationSettings::from_lookup(|key| {
            (key == ENV_DOLLAR_PER_PERCENTAGE_POINT).then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }

    #[test]
    fn test_from_json_partial_document() {
        let json = r#"{"maintainThreshold": 2, "rebalanceRules": {"btcFloor": 10}}"#;
        let settings = AllocationSettings::from_json(json).unwrap();
        assert_eq!(settings.maintain_threshold, dec!(2));
        assert_eq!(settings.rebalance_rules.btc_floor, dec!(10));
        assert_eq!(settings.rebalance_rules.eth_ceiling, dec!(45));
        assert_eq!(settings.default_portfolio_value, dec!(100000));
    }

    #[test]
    fn test_from_json_rejects_negative_values() {
        let result = AllocationSettings::from_json(r#"{"dollarPerPercentagePoint": -1}"#);
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        let result = AllocationSettings::from_json("{not json");
        assert!(matches!(result, Err(Error::ConfigIO(_))));
    }
}
