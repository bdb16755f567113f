//! Target allocation sources.

use num_traits::ToPrimitive;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::allocation::ProcessedAssetCategory;
use crate::constants::{CATEGORY_ID_BTC, CATEGORY_ID_ETH, CATEGORY_ID_STABLECOINS, FULL_ALLOCATION};

use super::{RebalanceRules, TargetAllocationSource};

/// Demo target policy: trims BTC toward a floor, grows ETH toward a ceiling,
/// cuts stablecoins by a fixed step and jitters everything else.
///
/// This is a placeholder for a real optimizer. Randomness comes from the
/// injected RNG, so a seeded policy is reproducible.
pub struct RuleBasedTargetPolicy<R: Rng + Send = StdRng> {
    rules: RebalanceRules,
    rng: R,
}

impl RuleBasedTargetPolicy<StdRng> {
    /// Reproducible policy for tests and previews.
    pub fn seeded(rules: RebalanceRules, seed: u64) -> Self {
        Self::new(rules, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(rules: RebalanceRules) -> Self {
        Self::new(rules, StdRng::from_entropy())
    }
}

impl<R: Rng + Send> RuleBasedTargetPolicy<R> {
    pub fn new(rules: RebalanceRules, rng: R) -> Self {
        Self { rules, rng }
    }

    pub fn rules(&self) -> &RebalanceRules {
        &self.rules
    }

    fn target_for(&mut self, category: &ProcessedAssetCategory) -> Decimal {
        let current = category.total_allocation_percentage;
        let id = category.id();
        let rules = &self.rules;

        let target = if id.eq_ignore_ascii_case(CATEGORY_ID_BTC) {
            if current > rules.btc_floor {
                let step = random_between(&mut self.rng, rules.min_step, rules.max_step);
                current.saturating_sub(step).max(rules.btc_floor)
            } else {
                current
            }
        } else if id.eq_ignore_ascii_case(CATEGORY_ID_ETH) {
            if current < rules.eth_ceiling {
                let step = random_between(&mut self.rng, rules.min_step, rules.max_step);
                current.saturating_add(step).min(rules.eth_ceiling)
            } else {
                current
            }
        } else if id.eq_ignore_ascii_case(CATEGORY_ID_STABLECOINS) {
            current.saturating_sub(rules.stablecoin_step)
        } else {
            let jitter = random_between(&mut self.rng, -rules.variation, rules.variation);
            current.saturating_add(jitter)
        };

        target.clamp(Decimal::ZERO, FULL_ALLOCATION)
    }
}

impl<R: Rng + Send> TargetAllocationSource for RuleBasedTargetPolicy<R> {
    fn target_allocations(
        &mut self,
        current: &[ProcessedAssetCategory],
    ) -> HashMap<String, Decimal> {
        current
            .iter()
            .map(|category| (category.id().to_string(), self.target_for(category)))
            .collect()
    }
}

/// Targets supplied from outside, e.g. a saved strategy or an optimizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedTargetSource {
    targets: HashMap<String, Decimal>,
}

impl FixedTargetSource {
    pub fn new(targets: HashMap<String, Decimal>) -> Self {
        Self { targets }
    }
}

impl TargetAllocationSource for FixedTargetSource {
    fn target_allocations(
        &mut self,
        _current: &[ProcessedAssetCategory],
    ) -> HashMap<String, Decimal> {
        self.targets.clone()
    }
}

/// Uniform draw between `low` and `high` at 0.01 resolution.
fn random_between<R: Rng>(rng: &mut R, low: Decimal, high: Decimal) -> Decimal {
    let low = to_hundredths(low);
    let high = to_hundredths(high);
    if low >= high {
        return Decimal::new(low, 2);
    }
    Decimal::new(rng.gen_range(low..=high), 2)
}

fn to_hundredths(value: Decimal) -> i64 {
    (value * dec!(100)).round().to_i64().unwrap_or(0)
}
