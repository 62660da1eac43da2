use crate::tui::{action::Action, theme::Theme};
use color_eyre::Result;
use ratatui::{Frame, layout::Rect};

/// Base trait for all TUI components
///
/// Interactive elements receive already-translated [`Action`]s and draw
/// themselves with the application theme.
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(true) if the action was handled and consumed.
    /// Returns Ok(false) if the action was not handled and should propagate.
    fn handle_action(&mut self, action: Action) -> Result<bool>;

    /// Render the component within the given area
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Actions this component reacts to in its current state
    fn supported_actions(&self) -> Vec<Action>;

    /// Get component name for debugging/logging
    fn name(&self) -> &str;
}

/// Focusable component trait
///
/// Focus determines which component receives keyboard input.
pub trait Focusable: Component {
    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        focused: bool,
        count: usize,
    }

    impl Component for Counter {
        fn handle_action(&mut self, action: Action) -> Result<bool> {
            if self.supported_actions().contains(&action) {
                self.count += 1;
                Ok(true)
            } else {
                Ok(false)
            }
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}

        fn supported_actions(&self) -> Vec<Action> {
            vec![Action::MoveLeft, Action::MoveRight]
        }

        fn name(&self) -> &str {
            "Counter"
        }
    }

    impl Focusable for Counter {
        fn is_focused(&self) -> bool {
            self.focused
        }

        fn set_focused(&mut self, focused: bool) {
            self.focused = focused;
        }
    }

    #[test]
    fn test_component_action_handling() {
        let mut comp = Counter { focused: false, count: 0 };

        assert!(comp.handle_action(Action::MoveRight).unwrap());
        assert!(!comp.handle_action(Action::Quit).unwrap());
        assert_eq!(comp.count, 1);
        assert_eq!(comp.name(), "Counter");
    }

    #[test]
    fn test_focusable() {
        let mut comp = Counter { focused: false, count: 0 };
        comp.set_focused(true);
        assert!(comp.is_focused());
    }
}
