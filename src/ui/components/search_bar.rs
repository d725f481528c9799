//! Search input for the grid's free-text filter.
//!
//! The bar only edits the query; filtering happens in the grid as the query
//! changes.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Search input state.
#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    query: String,
    /// Whether the bar is accepting input.
    active: bool,
}

impl SearchBar {
    /// Create an inactive, empty search bar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing, keeping the current query.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop editing, keeping the query applied.
    pub fn commit(&mut self) {
        self.active = false;
    }

    /// Stop editing and clear the query.
    pub fn cancel(&mut self) {
        self.active = false;
        self.query.clear();
    }

    /// Check if the bar is accepting input.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Append a character.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character.
    pub fn pop_char(&mut self) -> Option<char> {
        self.query.pop()
    }
}

/// Highlight case-insensitive occurrences of `query` in `text`.
pub fn highlight_text(text: &str, query: &str) -> Line<'static> {
    let query = query.trim();
    if query.is_empty() {
        return Line::from(text.to_string());
    }

    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();
    // Lowercasing can change byte lengths for some scripts
    if text_lower.len() != text.len() {
        return Line::from(text.to_string());
    }

    let mut spans = Vec::new();
    let mut last_end = 0;
    for (start, matched) in text_lower.match_indices(&query_lower) {
        if start > last_end {
            spans.push(Span::raw(text[last_end..start].to_string()));
        }
        let end = start + matched.len();
        spans.push(Span::styled(
            text[start..end].to_string(),
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
        last_end = end;
    }
    if last_end < text.len() {
        spans.push(Span::raw(text[last_end..].to_string()));
    }

    Line::from(spans)
}

/// Render the search bar, showing `matches` once editing is done.
pub fn render_search_bar(frame: &mut Frame, area: Rect, search: &SearchBar, matches: usize) {
    if !search.active && search.query.is_empty() {
        return;
    }

    let (text, style) = if search.active {
        (format!("/{}", search.query), Style::default().fg(Color::Yellow))
    } else {
        (
            format!("/{} [{} matches]", search.query, matches),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(text).style(style), area);

    if search.active {
        let offset = search.query.chars().count() as u16 + 1;
        frame.set_cursor_position(Position::new(area.x + offset, area.y));
    }
}
