use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Home,
    End,

    // Filter operations
    OpenFilterMenu,
    OpenConditionMenu,
    OpenValuesMenu,
    OpenFilterIdentityMenu,
    RemoveFilter,
    ClearFilters,

    // View
    ToggleHelp,

    // Application
    Quit,
    Confirm,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Previous chip segment",
            Action::MoveRight => "Next chip segment",
            Action::Home => "First chip",
            Action::End => "Add filter button",
            Action::OpenFilterMenu => "Add filter",
            Action::OpenConditionMenu => "Change condition",
            Action::OpenValuesMenu => "Change values",
            Action::OpenFilterIdentityMenu => "Change filter",
            Action::RemoveFilter => "Remove filter",
            Action::ClearFilters => "Clear all filters",
            Action::ToggleHelp => "Toggle help",
            Action::Quit => "Quit application",
            Action::Confirm => "Select",
            Action::Cancel => "Close menu",
        }
    }

    /// Get category for grouping in help screen
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::Home
            | Action::End => ActionCategory::Navigation,

            Action::OpenFilterMenu
            | Action::OpenConditionMenu
            | Action::OpenValuesMenu
            | Action::OpenFilterIdentityMenu
            | Action::RemoveFilter
            | Action::ClearFilters => ActionCategory::Filters,

            Action::ToggleHelp => ActionCategory::View,

            Action::Quit | Action::Confirm | Action::Cancel => ActionCategory::Application,
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::Home,
            Action::End,
            Action::OpenFilterMenu,
            Action::OpenConditionMenu,
            Action::OpenValuesMenu,
            Action::OpenFilterIdentityMenu,
            Action::RemoveFilter,
            Action::ClearFilters,
            Action::ToggleHelp,
            Action::Quit,
            Action::Confirm,
            Action::Cancel,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Filters,
    View,
    Application,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Navigation => write!(f, "Navigation"),
            ActionCategory::Filters => write!(f, "Filters"),
            ActionCategory::View => write!(f, "View"),
            ActionCategory::Application => write!(f, "Application"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_actions_have_descriptions() {
        for action in Action::all() {
            assert!(!action.description().is_empty());
        }
    }

    #[test]
    fn test_filter_actions_are_grouped() {
        assert_eq!(Action::RemoveFilter.category(), ActionCategory::Filters);
        assert_eq!(Action::MoveLeft.category(), ActionCategory::Navigation);
        assert_eq!(ActionCategory::Filters.to_string(), "Filters");
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::OpenFilterMenu;
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, "\"OpenFilterMenu\"");

        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, action);
    }
}
