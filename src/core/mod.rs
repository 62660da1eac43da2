pub mod catalog;
pub mod display;
pub mod menu;
pub mod popover;
pub mod reducer;
pub mod state;
pub mod types;

pub use catalog::{CatalogError, FilterCatalog, FilterItem, SubItem};
pub use display::{available_conditions, sub_items_display, summary};
pub use menu::{MenuEntry, MenuView};
pub use popover::{PopoverCoordinator, PopoverSlot};
pub use reducer::{FilterAction, FilterMachine, transition};
pub use state::{Chip, FilterState, all_filters_empty};
pub use types::*;
