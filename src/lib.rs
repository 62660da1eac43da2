#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod core;
pub mod logging;
pub mod services;
pub mod tui;

// Re-export commonly used types
pub use core::{FilterAction, FilterCatalog, FilterCondition, FilterItem, FilterState, SubItem};
pub use services::FilterSession;
pub use tui::{Action, ActionCategory};
