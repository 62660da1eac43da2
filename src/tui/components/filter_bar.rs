//! Filter bar component
//!
//! Renders one chip per filter with selected values (`label`, `condition`,
//! `values`, remove control) followed by the add-filter button, and hosts
//! the popovers anchored to them. Keyboard focus walks the chip segments.

use crate::core::{Chip, FilterAction, FilterId, MenuView, PopoverSlot, sub_items_display};
use crate::services::FilterSession;
use crate::tui::components::command_menu::CommandMenu;
use crate::tui::components::condition_picker::ConditionPicker;
use crate::tui::{Action, Component, Focusable, Theme};
use color_eyre::Result;
use ratatui::{Frame, layout::Rect, style::Style, text::Span};
use tracing::debug;

/// Clickable parts of a chip, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipSegment {
    Label,
    Condition,
    Values,
    Remove,
}

impl ChipSegment {
    pub const ORDER: [ChipSegment; 4] = [
        ChipSegment::Label,
        ChipSegment::Condition,
        ChipSegment::Values,
        ChipSegment::Remove,
    ];
}

/// Element of the bar holding keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarFocus {
    Chip { index: usize, segment: ChipSegment },
    AddButton,
}

/// A segment laid out on the bar, relative to the bar origin
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlacedSegment {
    target: BarFocus,
    text: String,
    x: u16,
    row: u16,
    width: u16,
}

pub struct FilterBar {
    session: FilterSession,
    focus: BarFocus,
    focused: bool,
    menu_cursor: usize,
    menu_view: MenuView,
    condition_picker: Option<ConditionPicker>,
    /// Absolute screen rectangles from the last render, used to anchor popovers
    anchors: Vec<(BarFocus, Rect)>,
}

impl FilterBar {
    pub fn new(session: FilterSession) -> Self {
        let menu_view = session.menu_view();
        let focus = if session.chips().is_empty() {
            BarFocus::AddButton
        } else {
            BarFocus::Chip {
                index: 0,
                segment: ChipSegment::Label,
            }
        };
        Self {
            session,
            focus,
            focused: true,
            menu_cursor: 0,
            menu_view,
            condition_picker: None,
            anchors: Vec::new(),
        }
    }

    pub fn session(&self) -> &FilterSession {
        &self.session
    }

    pub fn focus(&self) -> BarFocus {
        self.focus
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn condition_picker(&self) -> Option<&ConditionPicker> {
        self.condition_picker.as_ref()
    }

    /// True while any popover (coordinated or the condition picker) is shown
    pub fn has_open_menu(&self) -> bool {
        self.condition_picker.is_some() || self.session.popovers().any_open()
    }

    fn focus_targets(&self) -> Vec<BarFocus> {
        let chips = self.session.chips().len();
        (0..chips)
            .flat_map(|index| {
                ChipSegment::ORDER
                    .into_iter()
                    .map(move |segment| BarFocus::Chip { index, segment })
            })
            .chain(std::iter::once(BarFocus::AddButton))
            .collect()
    }

    fn move_focus(&mut self, delta: isize) {
        let targets = self.focus_targets();
        let current = targets.iter().position(|t| *t == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, targets.len() as isize - 1) as usize;
        self.focus = targets[next];
    }

    fn focused_filter(&self) -> Option<FilterId> {
        match self.focus {
            BarFocus::Chip { index, .. } => self.session.chips().get(index).map(|c| c.filter.clone()),
            BarFocus::AddButton => None,
        }
    }

    fn open_popover(&mut self, slot: PopoverSlot, filter: Option<FilterId>) {
        self.condition_picker = None;
        self.session.set_open(slot, filter, true);
        self.menu_view = self.session.menu_view();
        self.menu_cursor = 0;
    }

    fn open_condition_picker(&mut self, filter: FilterId) {
        self.session.close_popovers();
        self.condition_picker = Some(ConditionPicker::open(filter, self.session.state()));
    }

    fn remove_filter(&mut self, filter: FilterId) {
        debug!("Removing filter '{filter}'");
        self.session.dispatch(FilterAction::RemoveFilter { filter });
    }

    /// Run a chip-level operation against the focused chip
    fn on_focused_chip(&mut self, op: impl FnOnce(&mut Self, FilterId)) -> bool {
        match self.focused_filter() {
            Some(filter) => {
                op(self, filter);
                true
            }
            None => false,
        }
    }

    fn activate_focus(&mut self) {
        match self.focus {
            BarFocus::AddButton => self.open_popover(PopoverSlot::Main, None),
            BarFocus::Chip { segment, .. } => {
                self.on_focused_chip(|bar, filter| match segment {
                    ChipSegment::Label => bar.open_popover(PopoverSlot::FilterIdentity, Some(filter)),
                    ChipSegment::Condition => bar.open_condition_picker(filter),
                    ChipSegment::Values => bar.open_popover(PopoverSlot::SubItem, Some(filter)),
                    ChipSegment::Remove => bar.remove_filter(filter),
                });
            }
        }
    }

    fn handle_picker_action(&mut self, action: Action) -> bool {
        let Some(picker) = &mut self.condition_picker else {
            return false;
        };
        match action {
            Action::MoveUp => picker.move_by(-1, self.session.state()),
            Action::MoveDown => picker.move_by(1, self.session.state()),
            Action::Confirm => {
                if let Some(set) = picker.confirm(self.session.state()) {
                    self.session.dispatch(set);
                }
                self.condition_picker = None;
            }
            Action::Cancel => self.condition_picker = None,
            Action::MoveLeft | Action::MoveRight | Action::Home | Action::End => {}
            _ => return false,
        }
        true
    }

    fn handle_menu_action(&mut self, action: Action) -> bool {
        let entries = self.session.menu_entries();
        let len = entries.len();
        match action {
            Action::MoveUp if len > 0 => self.menu_cursor = (self.menu_cursor + len - 1) % len,
            Action::MoveDown if len > 0 => self.menu_cursor = (self.menu_cursor + 1) % len,
            Action::Home => self.menu_cursor = 0,
            Action::End => self.menu_cursor = len.saturating_sub(1),
            Action::Confirm => {
                if let Some(entry) = entries.get(self.menu_cursor) {
                    self.session.select_menu_entry(&entry.value);
                }
            }
            Action::MoveLeft => {
                // Back to the catalog from a sub-item list opened via the catalog
                let from_catalog = matches!(
                    self.session.popovers().open_slot(),
                    Some(PopoverSlot::Main | PopoverSlot::FilterIdentity)
                );
                if from_catalog && matches!(self.menu_view, MenuView::SubItems(_)) {
                    self.session.dispatch(FilterAction::ToggleSubmenu {
                        is_open: false,
                        filter: None,
                    });
                }
            }
            Action::Cancel => self.session.close_popovers(),
            Action::MoveUp | Action::MoveDown | Action::MoveRight => {}
            _ => return false,
        }
        true
    }

    fn handle_bar_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_focus(-1),
            Action::MoveRight => self.move_focus(1),
            Action::Home => {
                if let Some(first) = self.focus_targets().first() {
                    self.focus = *first;
                }
            }
            Action::End => self.focus = BarFocus::AddButton,
            Action::Confirm => self.activate_focus(),
            _ => return false,
        }
        true
    }

    /// Restore invariants after the state changed underneath the bar
    fn normalize(&mut self) {
        let chips = self.session.chips();
        if let BarFocus::Chip { index, .. } = self.focus {
            if index >= chips.len() {
                self.focus = match chips.len() {
                    0 => BarFocus::AddButton,
                    n => BarFocus::Chip {
                        index: n - 1,
                        segment: ChipSegment::Label,
                    },
                };
            }
        }

        // Per-chip popovers disappear together with their chip
        let popovers = self.session.popovers();
        let orphaned = popovers
            .open_slot()
            .is_some_and(|slot| slot != PopoverSlot::Main)
            && popovers
                .active_filter()
                .is_none_or(|f| !self.session.state().has_chip(f.as_str()));
        if orphaned {
            self.session.close_popovers();
        }

        let stale_picker = self
            .condition_picker
            .as_ref()
            .is_some_and(|p| !self.session.state().has_chip(p.filter.as_str()));
        if stale_picker {
            self.condition_picker = None;
        }

        let view = self.session.menu_view();
        if view != self.menu_view {
            self.menu_view = view;
            self.menu_cursor = 0;
        }
        let len = self.session.menu_entries().len();
        if self.menu_cursor >= len {
            self.menu_cursor = len.saturating_sub(1);
        }
    }

    fn segment_text(&self, chip: &Chip, segment: ChipSegment) -> String {
        let filter = self.session.catalog().find(chip.filter.as_str());
        match segment {
            ChipSegment::Label => match filter {
                Some(f) => match &f.icon {
                    Some(icon) => format!(" {icon} {} ", f.label),
                    None => format!(" {} ", f.label),
                },
                None => " ".to_string(),
            },
            ChipSegment::Condition => format!(" {} ", chip.condition),
            ChipSegment::Values => {
                let text = filter
                    .map(|f| sub_items_display(f, &chip.sub_items))
                    .unwrap_or_default();
                format!(" {text} ")
            }
            ChipSegment::Remove => " ✕ ".to_string(),
        }
    }

    fn add_button_text(&self, has_chips: bool) -> String {
        if has_chips {
            " + ".to_string()
        } else {
            " + Filter ".to_string()
        }
    }

    /// Lay chips out left to right, wrapping whole chips onto new rows
    fn layout(&self, width: u16) -> Vec<PlacedSegment> {
        let mut placed = Vec::new();
        let (mut x, mut row) = (0u16, 0u16);
        let chips = self.session.chips();

        let mut place_group = |group: Vec<(BarFocus, String)>, placed: &mut Vec<PlacedSegment>| {
            let widths: Vec<u16> = group
                .iter()
                .map(|(_, text)| Span::raw(text.as_str()).width() as u16)
                .collect();
            let total: u16 = widths.iter().sum::<u16>() + widths.len().saturating_sub(1) as u16;
            if x > 0 && x.saturating_add(total) > width {
                row += 1;
                x = 0;
            }
            for ((target, text), w) in group.into_iter().zip(widths) {
                placed.push(PlacedSegment {
                    target,
                    text,
                    x,
                    row,
                    width: w,
                });
                x = x.saturating_add(w + 1);
            }
            x = x.saturating_add(1);
        };

        for (index, chip) in chips.iter().enumerate() {
            let group = ChipSegment::ORDER
                .into_iter()
                .map(|segment| (BarFocus::Chip { index, segment }, self.segment_text(chip, segment)))
                .collect();
            place_group(group, &mut placed);
        }
        place_group(
            vec![(BarFocus::AddButton, self.add_button_text(!chips.is_empty()))],
            &mut placed,
        );
        placed
    }

    /// Rows needed to show every chip at the given width
    pub fn required_height(&self, width: u16) -> u16 {
        self.layout(width)
            .iter()
            .map(|s| s.row + 1)
            .max()
            .unwrap_or(1)
    }

    fn segment_style(&self, target: BarFocus, theme: &Theme) -> Style {
        if self.focused && target == self.focus {
            return theme.focused_segment_style();
        }
        match target {
            BarFocus::Chip { segment, .. } => match segment {
                ChipSegment::Label => theme.chip_label_style(),
                ChipSegment::Condition => theme.chip_condition_style(),
                ChipSegment::Values => theme.chip_value_style(),
                ChipSegment::Remove => theme.muted_style(),
            },
            BarFocus::AddButton => theme.border_style(),
        }
    }

    fn anchor(&self, target: BarFocus) -> Option<Rect> {
        self.anchors
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, rect)| *rect)
    }

    fn chip_anchor(&self, filter: &FilterId, segment: ChipSegment) -> Option<Rect> {
        let index = self.session.chips().iter().position(|c| &c.filter == filter)?;
        self.anchor(BarFocus::Chip { index, segment })
    }

    /// Draw whichever popover is open on top of everything else
    pub fn render_popovers(&self, frame: &mut Frame, theme: &Theme) {
        let bounds = frame.area();

        if let Some(picker) = &self.condition_picker {
            let Some(anchor) = self.chip_anchor(&picker.filter, ChipSegment::Condition) else {
                return;
            };
            let entries = picker.entries(self.session.state());
            let area = CommandMenu::area_below(anchor, entries.len(), bounds);
            frame.render_widget(
                CommandMenu::new(&entries, picker.cursor, theme).title(" Condition "),
                area,
            );
            return;
        }

        let popovers = self.session.popovers();
        let Some(slot) = popovers.open_slot() else {
            return;
        };
        let anchor = match (slot, popovers.active_filter()) {
            (PopoverSlot::Main, _) => self.anchor(BarFocus::AddButton),
            (PopoverSlot::FilterIdentity, Some(filter)) => self.chip_anchor(filter, ChipSegment::Label),
            (PopoverSlot::SubItem, Some(filter)) => self.chip_anchor(filter, ChipSegment::Values),
            _ => None,
        };
        let Some(anchor) = anchor else {
            return;
        };

        let entries = self.session.menu_entries();
        let title = match &self.menu_view {
            MenuView::TopLevel => " Filters ".to_string(),
            MenuView::SubItems(filter) => self
                .session
                .catalog()
                .find(filter.as_str())
                .map(|f| format!(" {} ", f.label))
                .unwrap_or_default(),
        };
        let area = CommandMenu::area_below(anchor, entries.len(), bounds);
        frame.render_widget(
            CommandMenu::new(&entries, self.menu_cursor, theme).title(&title),
            area,
        );
    }
}

impl Component for FilterBar {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        let handled = match action {
            Action::OpenFilterMenu => {
                self.focus = BarFocus::AddButton;
                self.open_popover(PopoverSlot::Main, None);
                true
            }
            Action::OpenFilterIdentityMenu => self.on_focused_chip(|bar, filter| {
                bar.open_popover(PopoverSlot::FilterIdentity, Some(filter))
            }),
            Action::OpenValuesMenu => {
                self.on_focused_chip(|bar, filter| bar.open_popover(PopoverSlot::SubItem, Some(filter)))
            }
            Action::OpenConditionMenu => self.on_focused_chip(|bar, filter| bar.open_condition_picker(filter)),
            Action::RemoveFilter => self.on_focused_chip(|bar, filter| bar.remove_filter(filter)),
            Action::ClearFilters => {
                self.condition_picker = None;
                self.session.dispatch(FilterAction::Reset);
                true
            }
            _ if self.condition_picker.is_some() => self.handle_picker_action(action),
            _ if self.session.popovers().any_open() => self.handle_menu_action(action),
            _ => self.handle_bar_action(action),
        };
        self.normalize();
        Ok(handled)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let placed = self.layout(area.width);
        self.anchors.clear();

        let buf = frame.buffer_mut();
        for segment in placed {
            if segment.row >= area.height {
                continue;
            }
            let rect = Rect {
                x: area.x + segment.x,
                y: area.y + segment.row,
                width: segment.width.min(area.width.saturating_sub(segment.x)),
                height: 1,
            };
            let style = self.segment_style(segment.target, theme);
            buf.set_stringn(rect.x, rect.y, &segment.text, rect.width as usize, style);
            self.anchors.push((segment.target, rect));
        }
    }

    fn supported_actions(&self) -> Vec<Action> {
        if self.has_open_menu() {
            vec![Action::MoveUp, Action::MoveDown, Action::Confirm, Action::Cancel]
        } else {
            vec![
                Action::MoveLeft,
                Action::MoveRight,
                Action::Confirm,
                Action::OpenFilterMenu,
                Action::OpenConditionMenu,
                Action::OpenValuesMenu,
                Action::RemoveFilter,
            ]
        }
    }

    fn name(&self) -> &str {
        "FilterBar"
    }
}

impl Focusable for FilterBar {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
