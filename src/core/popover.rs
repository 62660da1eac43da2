//! Popover coordination.
//!
//! Three overlay slots share the screen: the main add-filter menu, the
//! per-chip filter-identity menu and the per-chip sub-item menu. At most one
//! is visible at a time, and opening one tells the selection state machine
//! which menu content to show.

use crate::core::reducer::FilterAction;
use crate::core::types::FilterId;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Overlay surfaces managed by the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum PopoverSlot {
    /// Add-filter menu next to the chip bar
    Main,
    /// Menu opened from a chip's filter label
    FilterIdentity,
    /// Menu opened from a chip's selected values
    SubItem,
}

impl PopoverSlot {
    pub const ALL: [PopoverSlot; 3] = [PopoverSlot::Main, PopoverSlot::FilterIdentity, PopoverSlot::SubItem];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopoverCoordinator {
    main_open: bool,
    filter_open: bool,
    sub_item_open: bool,
    active_filter: Option<FilterId>,
}

impl PopoverCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open or close one slot, force-closing the other two.
    ///
    /// Returns the action the state machine must receive to stay in sync
    /// with what is now visible, if any.
    pub fn set_open(
        &mut self,
        slot: PopoverSlot,
        filter: Option<FilterId>,
        is_open: bool,
    ) -> Option<FilterAction> {
        self.main_open = false;
        self.filter_open = false;
        self.sub_item_open = false;
        self.active_filter = filter.clone();

        match slot {
            PopoverSlot::Main => self.main_open = is_open,
            PopoverSlot::FilterIdentity => self.filter_open = is_open,
            PopoverSlot::SubItem => self.sub_item_open = is_open,
        }

        if !is_open {
            return None;
        }
        match (slot, filter) {
            (PopoverSlot::Main | PopoverSlot::FilterIdentity, _) => Some(FilterAction::ToggleSubmenu {
                is_open: false,
                filter: None,
            }),
            (PopoverSlot::SubItem, Some(filter)) => Some(FilterAction::ToggleSubmenu {
                is_open: true,
                filter: Some(filter),
            }),
            (PopoverSlot::SubItem, None) => None,
        }
    }

    /// Hide every overlay and forget the highlighted filter
    pub fn close_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self, slot: PopoverSlot) -> bool {
        match slot {
            PopoverSlot::Main => self.main_open,
            PopoverSlot::FilterIdentity => self.filter_open,
            PopoverSlot::SubItem => self.sub_item_open,
        }
    }

    /// Whether `slot` is visible and anchored to `filter`
    pub fn is_open_for(&self, slot: PopoverSlot, filter: &str) -> bool {
        self.is_open(slot) && self.active_filter.as_ref().is_some_and(|f| f == filter)
    }

    /// The slot currently shown, if any
    pub fn open_slot(&self) -> Option<PopoverSlot> {
        PopoverSlot::ALL.into_iter().find(|slot| self.is_open(*slot))
    }

    pub fn any_open(&self) -> bool {
        self.open_slot().is_some()
    }

    pub fn active_filter(&self) -> Option<&FilterId> {
        self.active_filter.as_ref()
    }
}
