use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Built-in theme names selectable from config or the command line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

/// A theme defines the color scheme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // General UI colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,

    // Chip colors
    pub chip_label_fg: Color,
    pub chip_label_bg: Color,
    pub chip_value_fg: Color,
    pub chip_value_bg: Color,

    // Menu colors
    pub selected_fg: Color,
    pub selected_bg: Color,

    pub info: Color,
}

impl Default for Theme {
    /// Default dark theme
    fn default() -> Self {
        Self {
            name: "Default Dark".to_string(),
            background: Color::Reset,
            foreground: Color::Gray,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            chip_label_fg: Color::White,
            chip_label_bg: Color::Rgb(40, 40, 52),
            chip_value_fg: Color::Cyan,
            chip_value_bg: Color::Rgb(20, 40, 48),
            selected_fg: Color::Black,
            selected_bg: Color::Cyan,
            info: Color::Blue,
        }
    }
}

impl Theme {
    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            muted: Color::Gray,
            border: Color::Gray,
            border_focused: Color::Blue,
            chip_label_fg: Color::Black,
            chip_label_bg: Color::Rgb(235, 235, 240),
            chip_value_fg: Color::Blue,
            chip_value_bg: Color::Rgb(225, 235, 250),
            selected_fg: Color::White,
            selected_bg: Color::Blue,
            info: Color::Blue,
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::default(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn chip_label_style(&self) -> Style {
        Style::default()
            .fg(self.chip_label_fg)
            .bg(self.chip_label_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn chip_condition_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn chip_value_style(&self) -> Style {
        Style::default().fg(self.chip_value_fg).bg(self.chip_value_bg)
    }

    /// Style for the chip segment holding keyboard focus
    pub fn focused_segment_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }
}
