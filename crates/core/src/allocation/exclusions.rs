use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of category ids the user has removed from the active allocation.
///
/// Owned by whoever drives the dashboard and passed by reference into the
/// normalizer. Iteration order is sorted so outputs stay reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExcludedCategories {
    ids: BTreeSet<String>,
}

impl ExcludedCategories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_excluded(&self, category_id: &str) -> bool {
        self.ids.contains(category_id)
    }

    /// Returns true if the id was not already excluded.
    pub fn exclude(&mut self, category_id: impl Into<String>) -> bool {
        self.ids.insert(category_id.into())
    }

    /// Returns true if the id was excluded before.
    pub fn include(&mut self, category_id: &str) -> bool {
        self.ids.remove(category_id)
    }

    /// Flips the exclusion state and returns the new state (true = excluded).
    pub fn toggle(&mut self, category_id: &str) -> bool {
        if self.ids.remove(category_id) {
            false
        } else {
            self.ids.insert(category_id.to_string());
            true
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludedCategories {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let mut excluded = ExcludedCategories::new();
        assert!(excluded.toggle("btc"));
        assert!(excluded.is_excluded("btc"));
        assert!(!excluded.toggle("btc"));
        assert!(!excluded.is_excluded("btc"));
        assert!(excluded.is_empty());
    }

    #[test]
    fn test_exclude_include_report_changes() {
        let mut excluded = ExcludedCategories::new();
        assert!(excluded.exclude("eth"));
        assert!(!excluded.exclude("eth"));
        assert_eq!(excluded.len(), 1);
        assert!(excluded.include("eth"));
        assert!(!excluded.include("eth"));
    }

    #[test]
    fn test_ids_are_sorted() {
        let excluded: ExcludedCategories = ["stablecoins", "btc", "eth"].into_iter().collect();
        assert_eq!(
            excluded.ids().collect::<Vec<_>>(),
            vec!["btc", "eth", "stablecoins"]
        );
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let excluded: ExcludedCategories = ["eth", "btc"].into_iter().collect();
        let json = serde_json::to_string(&excluded).unwrap();
        assert_eq!(json, r#"["btc","eth"]"#);

        let back: ExcludedCategories = serde_json::from_str(&json).unwrap();
        assert_eq!(back, excluded);
    }

    #[test]
    fn test_clear() {
        let mut excluded: ExcludedCategories = ["btc"].into_iter().collect();
        excluded.clear();
        assert!(!excluded.is_excluded("btc"));
    }
}
