use crate::services::FilterSession;
use crate::tui::components::FilterBar;
use crate::tui::{Action, Component, Focusable, KeyBindings, Theme};
use color_eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use tracing::debug;

/// Actions advertised on the bottom help line
const HELP_LINE_ACTIONS: [Action; 6] = [
    Action::OpenFilterMenu,
    Action::Confirm,
    Action::RemoveFilter,
    Action::ClearFilters,
    Action::ToggleHelp,
    Action::Quit,
];

/// Application state
///
/// Owns the filter bar, routes key events through the keybindings and draws
/// the summary and help surfaces around it.
pub struct App {
    filter_bar: FilterBar,

    /// Keybindings configuration
    keybindings: KeyBindings,

    /// Current theme
    theme: Theme,

    /// Whether the keybinding overlay is shown
    show_help: bool,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    pub fn new(session: FilterSession) -> Self {
        let mut filter_bar = FilterBar::new(session);
        filter_bar.set_focused(true);
        Self {
            filter_bar,
            keybindings: KeyBindings::default(),
            theme: Theme::default(),
            show_help: false,
            should_quit: false,
        }
    }

    /// Handle a key event
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Only handle key press events, ignore release/repeat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if let Some(action) = self.keybindings.get_action(&key) {
            self.handle_action(action)?;
        }
        Ok(())
    }

    /// Handle an action
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                return Ok(());
            }
            Action::Cancel | Action::Confirm if self.show_help => {
                self.show_help = false;
                return Ok(());
            }
            _ if self.show_help => return Ok(()),
            _ => {}
        }

        let handled = self.filter_bar.handle_action(action)?;
        if !handled {
            debug!("Unhandled action: {action:?}");
        }
        Ok(())
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    pub fn session(&self) -> &FilterSession {
        self.filter_bar.session()
    }

    pub fn filter_bar(&self) -> &FilterBar {
        &self.filter_bar
    }

    /// Render the app
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let bar_height = self.filter_bar.required_height(area.width.saturating_sub(2)) + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(bar_height), // Filter bar
                Constraint::Length(3),          // Summary
                Constraint::Min(0),
                Constraint::Length(1), // Help line
            ])
            .split(area);

        let border_style = if self.filter_bar.is_focused() {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let bar_block = Block::default()
            .title(" Filters ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let bar_inner = bar_block.inner(chunks[0]);
        frame.render_widget(bar_block, chunks[0]);
        self.filter_bar.render(frame, bar_inner, &self.theme);

        self.render_summary(frame, chunks[1]);
        self.render_help_line(frame, chunks[3]);

        // Popovers draw over everything but the help overlay
        self.filter_bar.render_popovers(frame, &self.theme);

        if self.show_help {
            self.render_help_overlay(frame, Self::centered_rect(60, 70, area));
        }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let summary = self.session().summary();
        let line = if summary.is_empty() {
            Line::from(Span::styled("No filters applied", self.theme.muted_style()))
        } else {
            Line::from(Span::styled(summary, self.theme.info_style()))
        };
        let block = Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_help_line(&self, frame: &mut Frame, area: Rect) {
        let parts: Vec<String> = HELP_LINE_ACTIONS
            .iter()
            .filter_map(|action| {
                let keys = self.keybindings.get_keys_for_action(*action);
                keys.first()
                    .map(|key| format!("{key}: {}", action.description()))
            })
            .collect();
        let line = Line::from(Span::styled(parts.join("  │  "), self.theme.muted_style()));
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        let mut category = None;
        for action in Action::all() {
            if category != Some(action.category()) {
                if category.is_some() {
                    lines.push(Line::from(""));
                }
                category = Some(action.category());
                lines.push(Line::from(Span::styled(
                    action.category().to_string(),
                    self.theme.info_style(),
                )));
            }
            let keys = self.keybindings.get_keys_for_action(action).join(", ");
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<18}"), self.theme.chip_label_style()),
                Span::raw(" "),
                Span::styled(action.description(), self.theme.normal_style()),
            ]));
        }

        let block = Block::default()
            .title(" Keybindings ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.focused_border_style());
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    /// Helper to create centered rectangle
    fn centered_rect(percent_w: u16, percent_h: u16, area: Rect) -> Rect {
        let scale = |len: u16, percent: u16| {
            let scaled = u32::from(len) * u32::from(percent.min(100)) / 100;
            u16::try_from(scaled).unwrap_or(len)
        };
        let width = scale(area.width, percent_w);
        let height = scale(area.height, percent_h);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Get reference to theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Set theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Get keybindings
    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    /// Set keybindings
    pub fn set_keybindings(&mut self, keybindings: KeyBindings) {
        self.keybindings = keybindings;
    }
}
