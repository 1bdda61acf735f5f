//! TUI styles and color theme.

use ratatui::style::{Color, Modifier, Style};

use crate::model::CardStatus;

/// Color theme for the dashboard.
pub struct ColorTheme {
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::Gray,
        }
    }
}

impl ColorTheme {
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style of the big number on a card.
    #[must_use]
    pub fn value_style(&self, status: CardStatus) -> Style {
        let fg = match status {
            CardStatus::Waiting => self.muted,
            CardStatus::Counting => self.accent,
            CardStatus::Done => self.success,
            CardStatus::Stopped => self.warning,
        };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }
}
