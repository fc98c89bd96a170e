//! Click-driven cross-filter selection
//!
//! The host owns the applied filter. Each click starts from the host's
//! current selection, toggles the clicked key and asks the host for the
//! resulting filter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tandem_core::TemporalKey;

/// Order-irrelevant set of selected keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet(BTreeSet<TemporalKey>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &TemporalKey) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add `key` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, key: TemporalKey) -> bool {
        if self.0.remove(&key) {
            false
        } else {
            self.0.insert(key);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemporalKey> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<TemporalKey> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<TemporalKey> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = TemporalKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What a click asks the host to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRequest {
    /// First click with no filter applied yet
    Single(TemporalKey),
    /// Replace the applied filter with these keys
    Update(SelectionSet),
    /// Remove the filter
    Clear,
}

impl FilterRequest {
    /// Keys the request filters on (empty for `Clear`)
    pub fn keys(&self) -> Vec<TemporalKey> {
        match self {
            Self::Single(key) => vec![*key],
            Self::Update(set) => set.to_vec(),
            Self::Clear => Vec::new(),
        }
    }
}

/// Toggle `clicked` against the host's active selection.
///
/// Returns the working selection after the click and the request to send.
/// With no active selection the click always adds.
pub fn toggle_selection(
    active: Option<&SelectionSet>,
    clicked: TemporalKey,
) -> (SelectionSet, FilterRequest) {
    let Some(active) = active else {
        let selection = std::iter::once(clicked).collect();
        return (selection, FilterRequest::Single(clicked));
    };

    let mut working = active.clone();
    working.toggle(clicked);

    let request = if working.is_empty() {
        FilterRequest::Clear
    } else {
        FilterRequest::Update(working.clone())
    };
    (working, request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> TemporalKey {
        TemporalKey::parse(raw).unwrap()
    }

    #[test]
    fn test_first_click_sends_single_value() {
        let (working, request) = toggle_selection(None, key("20240305"));
        assert_eq!(request, FilterRequest::Single(key("20240305")));
        assert_eq!(request.keys(), vec![key("20240305")]);
        assert_eq!(working.len(), 1);
    }

    #[test]
    fn test_second_click_extends_selection() {
        let active: SelectionSet = [key("20240305")].into_iter().collect();
        let (working, request) = toggle_selection(Some(&active), key("20240306"));

        assert_eq!(working.len(), 2);
        assert_eq!(request.keys(), vec![key("20240305"), key("20240306")]);
        assert!(matches!(request, FilterRequest::Update(_)));
    }

    #[test]
    fn test_clicking_only_selected_key_clears() {
        let active: SelectionSet = [key("20240305")].into_iter().collect();
        let (working, request) = toggle_selection(Some(&active), key("20240305"));
        assert!(working.is_empty());
        assert_eq!(request, FilterRequest::Clear);
        assert!(request.keys().is_empty());
    }

    #[test]
    fn test_double_toggle_restores_selection() {
        let active: SelectionSet = [key("20240301"), key("20240302")].into_iter().collect();

        for raw in ["20240302", "20240309"] {
            let (once, _) = toggle_selection(Some(&active), key(raw));
            let (twice, _) = toggle_selection(Some(&once), key(raw));
            assert_eq!(twice, active);
        }
    }

    #[test]
    fn test_empty_applied_filter_still_toggles() {
        let active = SelectionSet::new();
        let (working, request) = toggle_selection(Some(&active), key("20240305"));
        assert_eq!(working.len(), 1);
        assert!(matches!(request, FilterRequest::Update(_)));
    }

    #[test]
    fn test_toggle_reports_membership() {
        let mut set = SelectionSet::new();
        assert!(set.toggle(key("20240101")));
        assert!(set.contains(&key("20240101")));
        assert!(!set.toggle(key("20240101")));
        assert!(set.is_empty());
    }
}
