//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the grid viewer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Header row foreground.
    pub header: Color,
    /// Focused header cell and active borders.
    pub accent: Color,
    /// Cursor row background.
    pub cursor_bg: Color,
    /// Checked checkboxes.
    pub selected: Color,
    /// Secondary text.
    pub muted: Color,
}

impl Theme {
    /// Header cell style; the focused column is highlighted.
    pub fn header_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(self.header).add_modifier(Modifier::BOLD);
        if focused {
            style.fg(self.accent).add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    /// Cursor row style.
    pub fn cursor_style(&self) -> Style {
        Style::default().bg(self.cursor_bg).add_modifier(Modifier::BOLD)
    }

    /// Secondary text style.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            header: Color::Gray,
            accent: Color::Cyan,
            cursor_bg: Color::DarkGray,
            selected: Color::Green,
            muted: Color::DarkGray,
        }
    }
}
