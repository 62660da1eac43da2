use crate::core::catalog::FilterCatalog;
use crate::core::types::{FilterCondition, FilterId, SubItemId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory model of the widget's filter selection
///
/// Mutated only through [`crate::core::reducer::transition`]; an initial
/// snapshot may be deserialized from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Filters the user has touched, in display order
    pub selected_items: Vec<FilterId>,
    /// Selected sub-items per filter, in selection order
    pub selected_sub_items: BTreeMap<FilterId, Vec<SubItemId>>,
    pub conditions: BTreeMap<FilterId, FilterCondition>,
    /// Filters whose condition was set explicitly and not yet re-derived
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub condition_overrides: BTreeSet<FilterId>,
    /// Explicit `is` / `is not` set aside while a filter is not at one sub-item
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parked_conditions: BTreeMap<FilterId, FilterCondition>,
    /// True when the open menu lists sub-items instead of filters
    pub is_sub_menu_open: bool,
    /// Filter whose menu content is currently focused
    pub current_filter: Option<FilterId>,
}

/// One rendered chip: a filter with at least one selected sub-item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub filter: FilterId,
    pub condition: FilterCondition,
    pub sub_items: Vec<SubItemId>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True for the canonical empty state
    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_active(&self, filter: &str) -> bool {
        self.selected_items.iter().any(|f| f == filter)
    }

    pub fn sub_items(&self, filter: &str) -> &[SubItemId] {
        self.selected_sub_items
            .get(filter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_sub_item_selected(&self, filter: &str, sub_item: &str) -> bool {
        self.sub_items(filter).iter().any(|s| s == sub_item)
    }

    /// Condition shown for a filter, `is` when none was recorded
    pub fn condition(&self, filter: &str) -> FilterCondition {
        self.conditions.get(filter).copied().unwrap_or_default()
    }

    pub fn has_chip(&self, filter: &str) -> bool {
        self.is_active(filter) && !self.sub_items(filter).is_empty()
    }

    pub fn is_overridden(&self, filter: &str) -> bool {
        self.condition_overrides.contains(filter)
    }

    /// Chips to render, in activation order
    pub fn chips(&self) -> Vec<Chip> {
        self.selected_items
            .iter()
            .filter(|f| !self.sub_items(f.as_str()).is_empty())
            .map(|f| Chip {
                filter: f.clone(),
                condition: self.condition(f.as_str()),
                sub_items: self.sub_items(f.as_str()).to_vec(),
            })
            .collect()
    }

    /// Drop references the catalog cannot resolve and restore the structural
    /// invariants. Used on externally supplied snapshots.
    pub fn sanitized(mut self, catalog: &FilterCatalog) -> Self {
        let mut seen = BTreeSet::new();
        self.selected_items
            .retain(|f| catalog.contains(f.as_str()) && seen.insert(f.clone()));

        let active = &self.selected_items;
        self.selected_sub_items.retain(|f, _| active.contains(f));
        for (filter, subs) in self.selected_sub_items.iter_mut() {
            let Some(entry) = catalog.find(filter.as_str()) else {
                continue;
            };
            let mut seen_sub = BTreeSet::new();
            subs.retain(|s| entry.find_sub_item(s.as_str()).is_some() && seen_sub.insert(s.clone()));
        }

        let subs = &self.selected_sub_items;
        self.condition_overrides
            .retain(|f| subs.get(f).is_some_and(|s| !s.is_empty()));
        self.parked_conditions
            .retain(|f, c| subs.get(f).is_some_and(|s| s.len() != 1) && c.fits_single());
        for (filter, subs) in &self.selected_sub_items {
            if !self.condition_overrides.contains(filter) && !subs.is_empty() {
                self.conditions
                    .insert(filter.clone(), FilterCondition::derived_for(subs.len()));
            }
        }
        if self
            .current_filter
            .as_ref()
            .is_some_and(|f| !catalog.contains(f.as_str()))
        {
            self.current_filter = None;
            self.is_sub_menu_open = false;
        }
        self
    }
}

/// True when no filter has any selected sub-item
pub fn all_filters_empty(state: &FilterState) -> bool {
    state.selected_sub_items.values().all(Vec::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{FilterItem, SubItem};
    use pretty_assertions::assert_eq;

    fn catalog() -> FilterCatalog {
        FilterCatalog::new(vec![
            FilterItem::new("status", "Status").with_sub_items(vec![
                SubItem::new("active", "Active"),
                SubItem::new("inactive", "Inactive"),
            ]),
            FilterItem::new("priority", "Priority")
                .with_sub_items(vec![SubItem::new("high", "High")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_is_initial() {
        let state = FilterState::new();
        assert!(state.is_initial());
        assert!(all_filters_empty(&state));
        assert!(state.chips().is_empty());
    }

    #[test]
    fn test_chips_skip_empty_filters() {
        let mut state = FilterState::new();
        state.selected_items = vec!["status".into(), "priority".into()];
        state
            .selected_sub_items
            .insert("status".into(), vec![]);
        state
            .selected_sub_items
            .insert("priority".into(), vec!["high".into()]);

        let chips = state.chips();
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].filter, "priority");
        assert_eq!(chips[0].condition, FilterCondition::Is);
        assert!(!all_filters_empty(&state));
    }

    #[test]
    fn test_snapshot_roundtrip_and_defaults() {
        let json = r#"{"selected_items":["status"],"selected_sub_items":{"status":["active","inactive"]}}"#;
        let state: FilterState = serde_json::from_str(json).unwrap();
        assert!(!state.is_sub_menu_open);
        assert_eq!(state.current_filter, None);
        assert_eq!(state.sub_items("status").len(), 2);
    }

    #[test]
    fn test_sanitized_drops_unknown_references() {
        let json = r#"{
            "selected_items": ["status", "status", "ghost"],
            "selected_sub_items": {"status": ["active", "nope", "inactive"], "ghost": ["x"]},
            "conditions": {"status": "is"},
            "current_filter": "ghost",
            "is_sub_menu_open": true
        }"#;
        let state: FilterState = serde_json::from_str(json).unwrap();
        let state = state.sanitized(&catalog());

        assert_eq!(state.selected_items, vec![FilterId::from("status")]);
        assert_eq!(
            state.sub_items("status"),
            &[SubItemId::from("active"), SubItemId::from("inactive")]
        );
        assert!(!state.selected_sub_items.contains_key("ghost"));
        assert_eq!(state.condition("status"), FilterCondition::IsAnyOf);
        assert_eq!(state.current_filter, None);
        assert!(!state.is_sub_menu_open);
    }
}
