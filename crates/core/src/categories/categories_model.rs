//! Input models: asset categories and protocols, supplied by the portfolio data source.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{FULL_ALLOCATION, PERCENT_SUM_TOLERANCE};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::weighted_average;

/// A yield position inside an asset category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    pub id: String,
    pub name: String,
    /// Share of the parent category (0-100)
    pub allocation: Decimal,
    pub chain: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub apy: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tvl: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub risk_score: Option<u8>,
}

/// A named bucket of protocols (e.g. BTC, ETH, Stablecoins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategory {
    pub id: String,
    pub name: String,
    /// Chart color (hex code)
    pub color: String,
    #[serde(default)]
    pub protocols: Vec<Protocol>,
}

impl AssetCategory {
    /// Creates a category with no protocols.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            protocols: Vec::new(),
        }
    }

    pub fn with_protocols(mut self, protocols: Vec<Protocol>) -> Self {
        self.protocols = protocols;
        self
    }

    /// Allocation-weighted APY over the protocols that report one.
    ///
    /// Returns `None` when no protocol has an APY or their weights sum to zero.
    pub fn weighted_apy(&self) -> Option<Decimal> {
        let weights: Vec<(Decimal, Decimal)> = self
            .protocols
            .iter()
            .filter_map(|p| p.apy.map(|apy| (apy, p.allocation.max(Decimal::ZERO))))
            .collect();
        weighted_average(&weights)
    }

    /// Checks the category for malformed data before it enters the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Category '{}' must have a name",
                self.id
            ))));
        }

        let mut total = Decimal::ZERO;
        for protocol in &self.protocols {
            if protocol.allocation < Decimal::ZERO || protocol.allocation > FULL_ALLOCATION {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Protocol '{}' allocation must be between 0 and 100",
                    protocol.id
                ))));
            }
            total += protocol.allocation;
        }

        // Allow small rounding errors (within 0.01%)
        if total - FULL_ALLOCATION > PERCENT_SUM_TOLERANCE {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Protocol allocations in '{}' exceed 100%. Current sum: {:.2}%",
                self.id, total
            ))));
        }
        Ok(())
    }
}
