//! Command menu popover: a bordered, scrollable list of menu entries.

use crate::core::MenuEntry;
use crate::tui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

/// Width used for every popover, as long as the screen allows it
pub const MENU_WIDTH: u16 = 30;
const MAX_VISIBLE_ROWS: u16 = 10;
const EMPTY_TEXT: &str = "No filter found.";

/// Renders menu entries with an optional checkbox column
pub struct CommandMenu<'a> {
    entries: &'a [MenuEntry],
    cursor: usize,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> CommandMenu<'a> {
    pub fn new(entries: &'a [MenuEntry], cursor: usize, theme: &'a Theme) -> Self {
        Self {
            entries,
            cursor,
            title: "",
            theme,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Popover rectangle anchored below `anchor`, kept inside `bounds`
    pub fn area_below(anchor: Rect, rows: usize, bounds: Rect) -> Rect {
        let width = MENU_WIDTH.min(bounds.width);
        let height = (rows.max(1) as u16).min(MAX_VISIBLE_ROWS) + 2;
        let max_x = bounds.right().saturating_sub(width);
        let x = anchor.x.clamp(bounds.x, max_x.max(bounds.x));
        let y = anchor.bottom().min(bounds.bottom().saturating_sub(1));
        let height = height.min(bounds.bottom().saturating_sub(y));
        Rect { x, y, width, height }
    }

    fn line_for(&self, entry: &MenuEntry, selected: bool) -> Line<'a> {
        let mut spans: Vec<Span> = Vec::new();
        if let Some(checked) = entry.checked {
            spans.push(Span::raw(if checked { "[✓] " } else { "[ ] " }));
        }
        if let Some(icon) = &entry.icon {
            spans.push(Span::styled(format!("{icon} "), self.theme.muted_style()));
        }
        spans.push(Span::raw(entry.label.clone()));

        let line = Line::from(spans);
        if selected {
            line.style(self.theme.selected_style())
        } else {
            line.style(self.theme.normal_style())
        }
    }
}

impl Widget for CommandMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.focused_border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new(EMPTY_TEXT)
                .style(self.theme.muted_style())
                .render(inner, buf);
            return;
        }

        // Scroll so the cursor row stays visible
        let visible = inner.height as usize;
        let offset = if visible == 0 {
            0
        } else {
            self.cursor.saturating_sub(visible - 1)
        };

        let lines: Vec<Line> = self
            .entries
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(idx, entry)| self.line_for(entry, idx == self.cursor))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
