use crate::core::{FilterAction, FilterCondition, FilterId, FilterState, MenuEntry, available_conditions};

/// Condition picker opened from a chip's condition segment.
///
/// Not tracked by the popover coordinator; the filter bar keeps it mutually
/// exclusive with the coordinated popovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionPicker {
    pub filter: FilterId,
    pub cursor: usize,
}

impl ConditionPicker {
    /// Open with the cursor on the filter's current condition
    pub fn open(filter: FilterId, state: &FilterState) -> Self {
        let current = state.condition(filter.as_str());
        let cursor = Self::options(&filter, state)
            .iter()
            .position(|c| *c == current)
            .unwrap_or(0);
        Self { filter, cursor }
    }

    pub fn options(filter: &FilterId, state: &FilterState) -> Vec<FilterCondition> {
        available_conditions(state.sub_items(filter.as_str()).len())
    }

    /// Rows for the command menu; the current condition is marked
    pub fn entries(&self, state: &FilterState) -> Vec<MenuEntry> {
        let current = state.condition(self.filter.as_str());
        Self::options(&self.filter, state)
            .into_iter()
            .map(|condition| MenuEntry {
                value: condition.to_string(),
                label: condition.to_string(),
                icon: Some(if condition == current { "●" } else { "○" }.to_string()),
                checked: None,
            })
            .collect()
    }

    pub fn move_by(&mut self, delta: isize, state: &FilterState) {
        let len = Self::options(&self.filter, state).len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Action for the highlighted condition
    pub fn confirm(&self, state: &FilterState) -> Option<FilterAction> {
        Self::options(&self.filter, state)
            .get(self.cursor)
            .map(|condition| FilterAction::SetCondition {
                filter: self.filter.clone(),
                condition: *condition,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SubItemId;
    use pretty_assertions::assert_eq;

    fn state_with(count: usize) -> FilterState {
        let mut state = FilterState::default();
        state.selected_items.push("status".into());
        let subs = ["active", "inactive", "pending"][..count]
            .iter()
            .map(|s| SubItemId::from(*s))
            .collect::<Vec<_>>();
        state.selected_sub_items.insert("status".into(), subs);
        state
            .conditions
            .insert("status".into(), FilterCondition::derived_for(count));
        state
    }

    #[test]
    fn test_single_value_hides_any_of() {
        let state = state_with(1);
        let picker = ConditionPicker::open("status".into(), &state);
        let labels: Vec<_> = picker.entries(&state).into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["is".to_string(), "is not".to_string()]);
    }

    #[test]
    fn test_cursor_starts_on_current_condition() {
        let state = state_with(2);
        let picker = ConditionPicker::open("status".into(), &state);
        assert_eq!(picker.cursor, 2);
        assert_eq!(picker.entries(&state)[2].icon.as_deref(), Some("●"));
    }

    #[test]
    fn test_confirm_wraps_and_sets_condition() {
        let state = state_with(1);
        let mut picker = ConditionPicker::open("status".into(), &state);
        picker.move_by(-1, &state);
        assert_eq!(
            picker.confirm(&state),
            Some(FilterAction::SetCondition {
                filter: "status".into(),
                condition: FilterCondition::IsNot,
            })
        );
    }
}
