//! One mounted filter widget: catalog, selection state and popovers.

use crate::core::{
    Chip, FilterAction, FilterCatalog, FilterMachine, FilterState, MenuEntry, MenuView,
    PopoverCoordinator, PopoverSlot, menu,
};
use crate::core::types::FilterId;
use tracing::{debug, trace};

/// Glue between the selection state machine and the popover coordinator
///
/// The presentation layer talks only to this type: it opens and closes
/// popovers, picks menu rows and reads back chips and menu content.
#[derive(Debug, Clone)]
pub struct FilterSession {
    machine: FilterMachine,
    popovers: PopoverCoordinator,
}

impl FilterSession {
    pub fn new(catalog: FilterCatalog) -> Self {
        Self {
            machine: FilterMachine::new(catalog),
            popovers: PopoverCoordinator::new(),
        }
    }

    pub fn with_state(catalog: FilterCatalog, state: FilterState) -> Self {
        Self {
            machine: FilterMachine::with_state(catalog, state),
            popovers: PopoverCoordinator::new(),
        }
    }

    /// Feed an action to the state machine.
    ///
    /// Every popover closes when the action reset the state: an explicit
    /// `Reset`, or deselecting the last selected sub-item.
    pub fn dispatch(&mut self, action: FilterAction) {
        let was_initial = self.machine.state().is_initial();
        let is_initial = self.machine.dispatch(&action).is_initial();
        let reset = match action {
            FilterAction::Reset => true,
            FilterAction::SelectSubitem { .. } => is_initial && !was_initial,
            _ => false,
        };
        if reset && self.popovers.any_open() {
            debug!("Filter state reset, closing popovers");
            self.popovers.close_all();
        }
    }

    pub fn set_open(&mut self, slot: PopoverSlot, filter: Option<FilterId>, is_open: bool) {
        trace!("set_open({slot}, {filter:?}, {is_open})");
        if let Some(action) = self.popovers.set_open(slot, filter, is_open) {
            self.dispatch(action);
        }
    }

    /// Close whichever popover is open
    pub fn close_popovers(&mut self) {
        if let Some(slot) = self.popovers.open_slot() {
            let filter = self.popovers.active_filter().cloned();
            self.set_open(slot, filter, false);
        }
    }

    /// Pick the row with `value` in the current menu.
    ///
    /// Picking a catalog filter without sub-items closes the main popover.
    pub fn select_menu_entry(&mut self, value: &str) {
        let view = self.menu_view();
        let action = menu::entry_action(&view, value);
        self.dispatch(action);

        if view == MenuView::TopLevel
            && self
                .catalog()
                .find(value)
                .is_some_and(|filter| !filter.has_sub_items())
        {
            self.set_open(PopoverSlot::Main, None, false);
        }
    }

    pub fn menu_view(&self) -> MenuView {
        MenuView::from_state(self.state())
    }

    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        menu::menu_entries(&self.menu_view(), self.state(), self.catalog())
    }

    pub fn chips(&self) -> Vec<Chip> {
        self.state().chips()
    }

    pub fn summary(&self) -> String {
        crate::core::summary(self.state(), self.catalog())
    }

    pub fn state(&self) -> &FilterState {
        self.machine.state()
    }

    pub fn catalog(&self) -> &FilterCatalog {
        self.machine.catalog()
    }

    pub fn popovers(&self) -> &PopoverCoordinator {
        &self.popovers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FilterCondition, FilterItem, SubItem};
    use pretty_assertions::assert_eq;

    fn catalog() -> FilterCatalog {
        FilterCatalog::new(vec![
            FilterItem::new("status", "Status").with_sub_items(vec![
                SubItem::new("active", "Active"),
                SubItem::new("inactive", "Inactive"),
            ]),
            FilterItem::new("starred", "Starred"),
        ])
        .unwrap()
    }

    #[test]
    fn test_main_menu_flow() {
        let mut session = FilterSession::new(catalog());
        session.set_open(PopoverSlot::Main, None, true);
        assert_eq!(session.menu_view(), MenuView::TopLevel);

        session.select_menu_entry("status");
        assert_eq!(session.menu_view(), MenuView::SubItems("status".into()));
        assert!(session.popovers().is_open(PopoverSlot::Main));

        session.select_menu_entry("active");
        assert_eq!(session.chips().len(), 1);
        assert_eq!(session.chips()[0].condition, FilterCondition::Is);
    }

    #[test]
    fn test_filter_without_sub_items_closes_main() {
        let mut session = FilterSession::new(catalog());
        session.set_open(PopoverSlot::Main, None, true);
        session.select_menu_entry("starred");
        assert!(!session.popovers().any_open());
        assert!(session.state().is_active("starred"));
        assert!(session.chips().is_empty());
    }

    #[test]
    fn test_sub_item_popover_switches_view() {
        let mut session = FilterSession::new(catalog());
        session.set_open(PopoverSlot::Main, None, true);
        session.select_menu_entry("status");
        session.select_menu_entry("active");

        session.set_open(PopoverSlot::FilterIdentity, Some("status".into()), true);
        assert_eq!(session.menu_view(), MenuView::TopLevel);
        assert!(!session.state().is_sub_menu_open);

        session.set_open(PopoverSlot::SubItem, Some("status".into()), true);
        assert_eq!(session.menu_view(), MenuView::SubItems("status".into()));
        assert!(session.popovers().is_open_for(PopoverSlot::SubItem, "status"));
    }

    #[test]
    fn test_reset_closes_popovers() {
        let mut session = FilterSession::new(catalog());
        session.set_open(PopoverSlot::Main, None, true);
        session.select_menu_entry("status");
        session.select_menu_entry("active");
        session.set_open(PopoverSlot::SubItem, Some("status".into()), true);

        session.select_menu_entry("active");
        assert!(session.state().is_initial());
        assert!(!session.popovers().any_open());
        assert_eq!(session.popovers().active_filter(), None);
    }

    #[test]
    fn test_main_menu_stays_open_on_empty_state() {
        let mut session = FilterSession::new(catalog());
        session.set_open(PopoverSlot::Main, None, true);
        assert!(session.state().is_initial());
        assert!(session.popovers().is_open(PopoverSlot::Main));
    }

    #[test]
    fn test_explicit_reset_closes_popovers() {
        let mut session = FilterSession::new(catalog());
        session.set_open(PopoverSlot::Main, None, true);
        session.dispatch(FilterAction::Reset);
        assert!(!session.popovers().any_open());
    }

    #[test]
    fn test_close_popovers() {
        let mut session = FilterSession::new(catalog());
        session.set_open(PopoverSlot::FilterIdentity, Some("status".into()), true);
        session.close_popovers();
        assert!(!session.popovers().any_open());
    }
}
