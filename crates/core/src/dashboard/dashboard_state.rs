use log::debug;
use rust_decimal::Decimal;

use crate::allocation::{
    adjust_override, calculate_allocations, AllocationOverrides, ExcludedCategories,
};
use crate::categories::AssetCategory;
use crate::chart::project_target_chart_data;
use crate::rebalance::{RebalancePlanner, RuleBasedTargetPolicy, TargetAllocationSource};
use crate::settings::AllocationSettings;

use super::{DashboardView, PortfolioSummary};

/// Owns the allocation screen's inputs and the view derived from them.
///
/// Every setter drops the cached view; [`PortfolioDashboard::view`] rebuilds
/// it on the next read. Reads without an input change return the same view,
/// so a randomized target policy is not re-rolled.
pub struct PortfolioDashboard {
    settings: AllocationSettings,
    categories: Vec<AssetCategory>,
    excluded: ExcludedCategories,
    overrides: AllocationOverrides,
    total_portfolio_value: Option<Decimal>,
    rebalance_mode: bool,
    planner: RebalancePlanner,
    cached_view: Option<DashboardView>,
}

impl PortfolioDashboard {
    /// Dashboard with the rule based demo policy seeded from entropy.
    pub fn new(settings: AllocationSettings, categories: Vec<AssetCategory>) -> Self {
        let policy = RuleBasedTargetPolicy::from_entropy(settings.rebalance_rules.clone());
        Self::with_target_source(settings, categories, Box::new(policy))
    }

    pub fn with_target_source(
        settings: AllocationSettings,
        categories: Vec<AssetCategory>,
        source: Box<dyn TargetAllocationSource>,
    ) -> Self {
        let planner = RebalancePlanner::new(source, &settings);
        Self {
            settings,
            categories,
            excluded: ExcludedCategories::new(),
            overrides: AllocationOverrides::new(),
            total_portfolio_value: None,
            rebalance_mode: false,
            planner,
            cached_view: None,
        }
    }

    pub fn settings(&self) -> &AllocationSettings {
        &self.settings
    }

    pub fn categories(&self) -> &[AssetCategory] {
        &self.categories
    }

    pub fn excluded(&self) -> &ExcludedCategories {
        &self.excluded
    }

    pub fn overrides(&self) -> &AllocationOverrides {
        &self.overrides
    }

    pub fn is_rebalance_mode(&self) -> bool {
        self.rebalance_mode
    }

    /// Portfolio value in use: the caller's, or the configured default.
    pub fn portfolio_value(&self) -> Decimal {
        self.total_portfolio_value
            .unwrap_or(self.settings.default_portfolio_value)
    }

    pub fn set_categories(&mut self, categories: Vec<AssetCategory>) {
        self.categories = categories;
        self.invalidate();
    }

    /// Flips a category in or out of the active set. Returns true if it is now excluded.
    pub fn toggle_category(&mut self, category_id: &str) -> bool {
        let excluded = self.excluded.toggle(category_id);
        debug!(
            "Category '{}' {}",
            category_id,
            if excluded { "excluded" } else { "included" }
        );
        self.invalidate();
        excluded
    }

    pub fn set_excluded(&mut self, excluded: ExcludedCategories) {
        self.excluded = excluded;
        self.invalidate();
    }

    /// Pins a category's share of the portfolio. Other overrides are untouched.
    pub fn set_override(&mut self, category_id: &str, percentage: Decimal) {
        self.overrides.insert(category_id.to_string(), percentage);
        self.invalidate();
    }

    /// Slider move: sets one category and rescales the rest so the total stays 100.
    pub fn adjust_override(&mut self, category_id: &str, percentage: Decimal) {
        let current: AllocationOverrides = calculate_allocations(
            &self.categories,
            &self.excluded,
            &self.overrides,
            Some(self.portfolio_value()),
        )
        .processed_categories
        .into_iter()
        .map(|c| (c.category.id, c.total_allocation_percentage))
        .collect();
        let ids: Vec<String> = self.categories.iter().map(|c| c.id.clone()).collect();

        self.overrides = adjust_override(&current, &ids, category_id, percentage);
        self.invalidate();
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
        self.invalidate();
    }

    pub fn set_total_portfolio_value(&mut self, value: Option<Decimal>) {
        self.total_portfolio_value = value;
        self.invalidate();
    }

    pub fn set_rebalance_mode(&mut self, enabled: bool) {
        if self.rebalance_mode != enabled {
            self.rebalance_mode = enabled;
            self.invalidate();
        }
    }

    /// Current view, recomputed if any input changed since the last call.
    pub fn view(&mut self) -> &DashboardView {
        let view = match self.cached_view.take() {
            Some(view) => view,
            None => self.compute_view(),
        };
        self.cached_view.insert(view)
    }

    fn invalidate(&mut self) {
        self.cached_view = None;
    }

    fn compute_view(&mut self) -> DashboardView {
        let portfolio_value = self.portfolio_value();
        let allocation = calculate_allocations(
            &self.categories,
            &self.excluded,
            &self.overrides,
            Some(portfolio_value),
        );

        let rebalance_data = if self.rebalance_mode {
            Some(
                self.planner
                    .plan_with_portfolio_value(&allocation.processed_categories, portfolio_value),
            )
        } else {
            None
        };
        let target_chart_data = rebalance_data
            .as_ref()
            .map(project_target_chart_data)
            .unwrap_or_default();
        let summary = PortfolioSummary::from_categories(&allocation.processed_categories);

        DashboardView {
            processed_categories: allocation.processed_categories,
            chart_data: allocation.chart_data,
            rebalance_data,
            target_chart_data,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Protocol;
    use crate::rebalance::{FixedTargetSource, RebalanceRules, ShiftAction};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn protocol(id: &str, apy: Decimal) -> Protocol {
        Protocol {
            id: id.to_string(),
            name: id.to_string(),
            allocation: dec!(100),
            chain: "Ethereum".to_string(),
            apy: Some(apy),
            tvl: None,
            risk_score: None,
        }
    }

    fn categories() -> Vec<AssetCategory> {
        vec![
            AssetCategory::new("btc", "BTC", "#F7931A")
                .with_protocols(vec![protocol("wbtc", dec!(2))]),
            AssetCategory::new("eth", "ETH", "#627EEA")
                .with_protocols(vec![protocol("lido", dec!(4))]),
            AssetCategory::new("stablecoins", "Stablecoins", "#26A17B")
                .with_protocols(vec![protocol("aave", dec!(6))]),
        ]
    }

    fn dashboard_with_targets(targets: &[(&str, Decimal)]) -> PortfolioDashboard {
        let targets: HashMap<String, Decimal> = targets
            .iter()
            .map(|(id, value)| (id.to_string(), *value))
            .collect();
        PortfolioDashboard::with_target_source(
            AllocationSettings::default(),
            categories(),
            Box::new(FixedTargetSource::new(targets)),
        )
    }

    #[test]
    fn test_initial_view_splits_equally() {
        let mut dashboard = dashboard_with_targets(&[]);
        let view = dashboard.view();
        assert_eq!(view.processed_categories.len(), 3);
        assert_eq!(view.chart_data.len(), 3);
        assert!(view.rebalance_data.is_none());
        assert!(view.target_chart_data.is_empty());
        assert_eq!(view.summary.included_count, 3);
        assert_eq!(view.summary.total_value.round_dp(6), dec!(100000));
    }

    #[test]
    fn test_toggle_invalidates_view() {
        let mut dashboard = dashboard_with_targets(&[]);
        assert_eq!(dashboard.view().chart_data.len(), 3);

        assert!(dashboard.toggle_category("btc"));
        let view = dashboard.view();
        assert_eq!(view.chart_data.len(), 2);
        assert_eq!(view.summary.excluded_count, 1);

        assert!(!dashboard.toggle_category("btc"));
        assert_eq!(dashboard.view().chart_data.len(), 3);
    }

    #[test]
    fn test_summary_weighted_apy_over_included() {
        let mut dashboard = dashboard_with_targets(&[]);
        dashboard.set_override("btc", dec!(50));
        dashboard.set_override("eth", dec!(25));
        dashboard.set_override("stablecoins", dec!(25));
        assert_eq!(dashboard.view().summary.weighted_apy, Some(dec!(3.5)));

        dashboard.toggle_category("btc");
        assert_eq!(dashboard.view().summary.weighted_apy, Some(dec!(5)));
        assert_eq!(dashboard.view().summary.included_value, dec!(50000));
    }

    #[test]
    fn test_rebalance_mode_builds_plan_and_target_chart() {
        let mut dashboard = dashboard_with_targets(&[
            ("btc", dec!(30)),
            ("eth", dec!(45)),
            ("stablecoins", dec!(25)),
        ]);
        dashboard.set_override("btc", dec!(40));
        dashboard.set_override("eth", dec!(35));
        dashboard.set_override("stablecoins", dec!(25));
        dashboard.toggle_category("stablecoins");
        dashboard.set_rebalance_mode(true);

        let view = dashboard.view();
        let plan = view.rebalance_data.as_ref().unwrap();
        assert_eq!(plan.shifts.len(), 3);
        assert_eq!(plan.shifts[0].action, ShiftAction::Decrease);
        assert_eq!(plan.shifts[1].action, ShiftAction::Increase);
        assert_eq!(plan.shifts[2].action, ShiftAction::Maintain);
        assert_eq!(plan.total_rebalance_value, dec!(20000));

        let target_ids: Vec<&str> = view.target_chart_data.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(target_ids, vec!["btc", "eth"]);
        assert_eq!(view.target_chart_data[0].value, dec!(40));
    }

    #[test]
    fn test_view_is_cached_until_inputs_change() {
        let mut dashboard = PortfolioDashboard::with_target_source(
            AllocationSettings::default(),
            categories(),
            Box::new(RuleBasedTargetPolicy::seeded(RebalanceRules::default(), 5)),
        );
        dashboard.set_rebalance_mode(true);
        let first = dashboard.view().clone();
        let second = dashboard.view().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_adjust_override_keeps_total_at_100() {
        let mut dashboard = dashboard_with_targets(&[]);
        dashboard.adjust_override("btc", dec!(50));

        let overrides = dashboard.overrides();
        assert_eq!(overrides["btc"], dec!(50));
        let total: Decimal = overrides.values().copied().sum();
        assert!((total - dec!(100)).abs() < dec!(0.000001));

        let view = dashboard.view();
        let eth = &view.processed_categories[1];
        assert_eq!(eth.total_allocation_percentage.round_dp(6), dec!(25));
    }

    #[test]
    fn test_portfolio_value_override_and_clear() {
        let mut dashboard = dashboard_with_targets(&[]);
        dashboard.set_total_portfolio_value(Some(dec!(3000)));
        dashboard.set_override("btc", dec!(100));
        assert_eq!(dashboard.view().processed_categories[0].total_value, dec!(3000));

        dashboard.clear_overrides();
        dashboard.set_total_portfolio_value(None);
        assert_eq!(dashboard.portfolio_value(), dec!(100000));
        assert!(dashboard.overrides().is_empty());
    }

    #[test]
    fn test_extreme_portfolio_value_still_renders() {
        let mut dashboard = PortfolioDashboard::with_target_source(
            AllocationSettings::default(),
            categories(),
            Box::new(RuleBasedTargetPolicy::seeded(RebalanceRules::default(), 3)),
        );
        dashboard.set_total_portfolio_value(Some(Decimal::MAX));
        dashboard.set_override("btc", Decimal::MAX);
        dashboard.set_rebalance_mode(true);

        let view = dashboard.view();
        assert_eq!(view.summary.total_value, Decimal::MAX);
        assert_eq!(view.summary.weighted_apy.map(|apy| apy.round_dp(6)), Some(dec!(2)));
        assert_eq!(view.chart_data.len(), 3);
        let plan = view.rebalance_data.as_ref().unwrap();
        assert_eq!(plan.shifts[0].action, ShiftAction::Decrease);
    }

    #[test]
    fn test_set_categories_and_excluded() {
        let mut dashboard = dashboard_with_targets(&[]);
        dashboard.set_excluded(["eth"].into_iter().collect());
        dashboard.set_categories(categories().into_iter().take(2).collect());
        let view = dashboard.view();
        assert_eq!(view.processed_categories.len(), 2);
        assert_eq!(view.chart_data.len(), 1);
        assert_eq!(view.chart_data[0].value, dec!(100));
        assert!(dashboard.excluded().is_excluded("eth"));
        assert_eq!(dashboard.categories().len(), 2);
    }
}
