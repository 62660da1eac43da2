pub mod command_menu;
pub mod condition_picker;
pub mod filter_bar;

pub use command_menu::CommandMenu;
pub use condition_picker::ConditionPicker;
pub use filter_bar::{BarFocus, ChipSegment, FilterBar};
