//! Selection state machine.
//!
//! [`transition`] is a pure, total function of (state, action, catalog). Stale
//! or malformed actions leave the state untouched.

use crate::core::catalog::FilterCatalog;
use crate::core::state::{FilterState, all_filters_empty};
use crate::core::types::{CountClass, FilterCondition, FilterId, SubItemId};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

/// Actions accepted by the selection state machine
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterAction {
    /// Activate a filter and focus it
    SelectItem(FilterId),
    /// Toggle a sub-item of an active filter
    SelectSubitem { filter: FilterId, sub_item: SubItemId },
    /// Explicitly choose the condition of a filter with a chip
    SetCondition {
        filter: FilterId,
        condition: FilterCondition,
    },
    RemoveFilter { filter: FilterId },
    /// Switch between catalog and sub-item view without touching selections
    ToggleSubmenu {
        is_open: bool,
        filter: Option<FilterId>,
    },
    Reset,
}

/// Compute the next state
pub fn transition(state: &FilterState, action: &FilterAction, catalog: &FilterCatalog) -> FilterState {
    match action {
        FilterAction::SelectItem(filter) => select_item(state, filter, catalog),
        FilterAction::SelectSubitem { filter, sub_item } => {
            select_sub_item(state, filter, sub_item, catalog)
        }
        FilterAction::SetCondition { filter, condition } => {
            set_condition(state, filter, *condition)
        }
        FilterAction::RemoveFilter { filter } => remove_filter(state, filter),
        FilterAction::ToggleSubmenu { is_open, filter } => {
            let mut next = state.clone();
            next.is_sub_menu_open = *is_open;
            next.current_filter = filter.clone();
            next
        }
        FilterAction::Reset => FilterState::default(),
    }
}

fn select_item(state: &FilterState, filter: &FilterId, catalog: &FilterCatalog) -> FilterState {
    let Some(entry) = catalog.find(filter.as_str()) else {
        debug!("Ignoring selection of unknown filter '{filter}'");
        return state.clone();
    };
    let mut next = state.clone();
    if !next.is_active(filter.as_str()) {
        next.selected_items.push(filter.clone());
    }
    next.is_sub_menu_open = entry.has_sub_items();
    next.current_filter = Some(filter.clone());
    next
}

fn select_sub_item(
    state: &FilterState,
    filter: &FilterId,
    sub_item: &SubItemId,
    catalog: &FilterCatalog,
) -> FilterState {
    let known = catalog
        .find(filter.as_str())
        .is_some_and(|entry| entry.find_sub_item(sub_item.as_str()).is_some());
    if !known || !state.is_active(filter.as_str()) {
        debug!("Ignoring sub-item '{sub_item}' for inactive or unknown filter '{filter}'");
        return state.clone();
    }

    let current = state.sub_items(filter.as_str());
    let before = CountClass::of(current.len());
    let updated: Vec<SubItemId> = if current.contains(sub_item) {
        current.iter().filter(|s| *s != sub_item).cloned().collect()
    } else {
        current.iter().cloned().chain(std::iter::once(sub_item.clone())).collect()
    };
    let after = CountClass::of(updated.len());

    let mut next = state.clone();
    next.selected_sub_items.insert(filter.clone(), updated);

    if after == CountClass::Empty && all_filters_empty(&next) {
        debug!("Last sub-item deselected, resetting filter state");
        return FilterState::default();
    }
    if before == after && next.is_overridden(filter.as_str()) {
        return next;
    }

    // Leaving the single class parks an explicit `is` / `is not` until the
    // filter is back to one sub-item
    let condition = next.condition(filter.as_str());
    if before == CountClass::Single && next.is_overridden(filter.as_str()) && condition.fits_single() {
        next.parked_conditions.insert(filter.clone(), condition);
    }
    next.condition_overrides.remove(filter.as_str());

    match after {
        CountClass::Empty => {}
        CountClass::Single => {
            let restored = next.parked_conditions.remove(filter.as_str());
            if let Some(parked) = restored {
                next.conditions.insert(filter.clone(), parked);
                next.condition_overrides.insert(filter.clone());
            } else {
                next.conditions
                    .insert(filter.clone(), FilterCondition::derived_for(1));
            }
        }
        CountClass::Multiple => {
            let count = next.sub_items(filter.as_str()).len();
            next.conditions
                .insert(filter.clone(), FilterCondition::derived_for(count));
        }
    }
    next
}

fn set_condition(state: &FilterState, filter: &FilterId, condition: FilterCondition) -> FilterState {
    if !state.has_chip(filter.as_str()) {
        debug!("Ignoring condition for filter '{filter}' without a chip");
        return state.clone();
    }
    let mut next = state.clone();
    next.conditions.insert(filter.clone(), condition);
    next.condition_overrides.insert(filter.clone());
    next.parked_conditions.remove(filter.as_str());
    next
}

fn remove_filter(state: &FilterState, filter: &FilterId) -> FilterState {
    let mut next = state.clone();
    next.selected_items.retain(|f| f != filter);
    next.selected_sub_items.remove(filter.as_str());
    next.condition_overrides.remove(filter.as_str());
    next.parked_conditions.remove(filter.as_str());
    next
}

/// A catalog paired with the state it drives
#[derive(Debug, Clone)]
pub struct FilterMachine {
    catalog: FilterCatalog,
    state: FilterState,
}

impl FilterMachine {
    pub fn new(catalog: FilterCatalog) -> Self {
        Self::with_state(catalog, FilterState::default())
    }

    /// Start from a snapshot; references the catalog cannot resolve are dropped
    pub fn with_state(catalog: FilterCatalog, state: FilterState) -> Self {
        let state = state.sanitized(&catalog);
        Self { catalog, state }
    }

    pub fn dispatch(&mut self, action: &FilterAction) -> &FilterState {
        let next = transition(&self.state, action, &self.catalog);
        if next != self.state {
            debug!("{action} -> {} active, submenu={}", next.selected_items.len(), next.is_sub_menu_open);
        }
        self.state = next;
        &self.state
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }
}
