//! Menu content shared by the three popovers.
//!
//! The state machine decides whether a menu lists the catalog or the
//! sub-items of one filter; [`MenuView`] makes that choice explicit so the
//! presentation layer can match on it.

use crate::core::catalog::FilterCatalog;
use crate::core::reducer::FilterAction;
use crate::core::state::FilterState;
use crate::core::types::FilterId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuView {
    /// Every filter in the catalog
    TopLevel,
    /// Sub-items of one filter, with checkboxes
    SubItems(FilterId),
}

impl MenuView {
    pub fn from_state(state: &FilterState) -> Self {
        match (&state.current_filter, state.is_sub_menu_open) {
            (Some(filter), true) => MenuView::SubItems(filter.clone()),
            _ => MenuView::TopLevel,
        }
    }
}

/// A selectable row of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub value: String,
    pub label: String,
    pub icon: Option<String>,
    /// `Some` for sub-item rows (checkbox state), `None` for catalog rows
    pub checked: Option<bool>,
}

/// Rows for the given view; empty when the view refers to an unknown filter
pub fn menu_entries(view: &MenuView, state: &FilterState, catalog: &FilterCatalog) -> Vec<MenuEntry> {
    match view {
        MenuView::TopLevel => catalog
            .iter()
            .map(|filter| MenuEntry {
                value: filter.value.to_string(),
                label: filter.label.clone(),
                icon: filter.icon.clone(),
                checked: None,
            })
            .collect(),
        MenuView::SubItems(filter_id) => catalog
            .find(filter_id.as_str())
            .map(|filter| {
                filter
                    .sub_items()
                    .iter()
                    .map(|sub| MenuEntry {
                        value: sub.value.to_string(),
                        label: sub.label.clone(),
                        icon: sub.icon.clone(),
                        checked: Some(state.is_sub_item_selected(filter_id.as_str(), sub.value.as_str())),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Action dispatched when the row with `value` is picked in `view`
pub fn entry_action(view: &MenuView, value: &str) -> FilterAction {
    match view {
        MenuView::TopLevel => FilterAction::SelectItem(value.into()),
        MenuView::SubItems(filter) => FilterAction::SelectSubitem {
            filter: filter.clone(),
            sub_item: value.into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{FilterItem, SubItem};
    use crate::core::reducer::transition;
    use pretty_assertions::assert_eq;

    fn catalog() -> FilterCatalog {
        FilterCatalog::new(vec![
            FilterItem::new("status", "Status")
                .with_icon("◉")
                .with_sub_items(vec![
                    SubItem::new("active", "Active"),
                    SubItem::new("inactive", "Inactive"),
                ]),
            FilterItem::new("starred", "Starred"),
        ])
        .unwrap()
    }

    #[test]
    fn test_view_follows_state() {
        let catalog = catalog();
        let state = FilterState::default();
        assert_eq!(MenuView::from_state(&state), MenuView::TopLevel);

        let state = transition(&state, &FilterAction::SelectItem("status".into()), &catalog);
        assert_eq!(MenuView::from_state(&state), MenuView::SubItems("status".into()));

        let state = transition(&state, &FilterAction::SelectItem("starred".into()), &catalog);
        assert_eq!(MenuView::from_state(&state), MenuView::TopLevel);
    }

    #[test]
    fn test_entries() {
        let catalog = catalog();
        let top = menu_entries(&MenuView::TopLevel, &FilterState::default(), &catalog);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].icon.as_deref(), Some("◉"));
        assert_eq!(top[0].checked, None);

        let state = transition(&FilterState::default(), &FilterAction::SelectItem("status".into()), &catalog);
        let state = transition(
            &state,
            &FilterAction::SelectSubitem { filter: "status".into(), sub_item: "inactive".into() },
            &catalog,
        );
        let view = MenuView::from_state(&state);
        let subs = menu_entries(&view, &state, &catalog);
        let checked: Vec<_> = subs.iter().map(|e| e.checked).collect();
        assert_eq!(checked, vec![Some(false), Some(true)]);

        let ghost = menu_entries(&MenuView::SubItems("ghost".into()), &state, &catalog);
        assert!(ghost.is_empty());
    }

    #[test]
    fn test_entry_action() {
        assert_eq!(
            entry_action(&MenuView::TopLevel, "status"),
            FilterAction::SelectItem("status".into())
        );
        assert_eq!(
            entry_action(&MenuView::SubItems("status".into()), "active"),
            FilterAction::SelectSubitem { filter: "status".into(), sub_item: "active".into() }
        );
    }
}
