use crate::core::catalog::{FilterCatalog, FilterItem};
use crate::core::state::FilterState;
use crate::core::types::{FilterCondition, SubItemId};

/// Text shown on a chip's value segment.
///
/// Empty for no selection, the sub-item label for one (empty when the
/// catalog lookup misses) and `"<n> <plural>"` for more.
pub fn sub_items_display(filter: &FilterItem, sub_items: &[SubItemId]) -> String {
    match sub_items {
        [] => String::new(),
        [only] => filter
            .find_sub_item(only.as_str())
            .map(|s| s.label.clone())
            .unwrap_or_default(),
        many => format!("{} {}", many.len(), filter.plural_label()),
    }
}

/// Conditions offered by the picker for a given selection size
pub fn available_conditions(count: usize) -> Vec<FilterCondition> {
    FilterCondition::ALL
        .into_iter()
        .filter(|c| count > 1 || *c != FilterCondition::IsAnyOf)
        .collect()
}

/// One-line description of the active chips, e.g.
/// `Status is Active; Priority is any of High, Critical`
pub fn summary(state: &FilterState, catalog: &FilterCatalog) -> String {
    state
        .chips()
        .iter()
        .filter_map(|chip| {
            let filter = catalog.find(chip.filter.as_str())?;
            let values = chip
                .sub_items
                .iter()
                .filter_map(|s| filter.find_sub_item(s.as_str()))
                .map(|s| s.label.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Some(format!("{} {} {}", filter.label, chip.condition, values))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
