//! Show/hide picker for a grid's toggleable columns.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::grid::ColumnPickerEntry;

/// What the picker asks the grid to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPickerAction {
    /// Flip one column.
    Toggle(String),
    /// Show every toggleable column.
    ShowAll,
    /// Hide every toggleable column.
    HideAll,
    /// Close the picker.
    Close,
}

/// A checkbox list over the grid's column picker entries.
#[derive(Debug, Default)]
pub struct ColumnPicker {
    entries: Vec<ColumnPickerEntry>,
    list_state: ListState,
}

impl ColumnPicker {
    /// Create a picker with the cursor on the first entry.
    pub fn new(entries: Vec<ColumnPickerEntry>) -> Self {
        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            entries,
            list_state,
        }
    }

    /// Refresh the checkboxes, keeping the cursor.
    pub fn set_entries(&mut self, entries: Vec<ColumnPickerEntry>) {
        let cursor = self.cursor().min(entries.len().saturating_sub(1));
        self.entries = entries;
        self.list_state
            .select((!self.entries.is_empty()).then_some(cursor));
    }

    /// Index of the focused entry.
    pub fn cursor(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Entries as last refreshed.
    pub fn entries(&self) -> &[ColumnPickerEntry] {
        &self.entries
    }

    fn move_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        let next = self.cursor().saturating_add_signed(delta).min(last);
        self.list_state.select(Some(next));
    }

    /// Handle keyboard input. Returns an action for the grid, if any.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ColumnPickerAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_by(1);
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_by(-1);
                None
            }
            (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => self
                .entries
                .get(self.cursor())
                .map(|e| ColumnPickerAction::Toggle(e.id.clone())),
            (KeyCode::Char('s'), _) => Some(ColumnPickerAction::ShowAll),
            (KeyCode::Char('h'), _) => Some(ColumnPickerAction::HideAll),
            (KeyCode::Esc, _) | (KeyCode::Char('c'), _) | (KeyCode::Char('q'), _) => {
                Some(ColumnPickerAction::Close)
            }
            _ => None,
        }
    }

    /// Render the picker as a popup over `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let shown = self.entries.iter().filter(|e| e.visible).count();
        let block = Block::default()
            .title(format!("Columns ({}/{})", shown, self.entries.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let items: Vec<ListItem> = if self.entries.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No toggleable columns",
                Style::default().fg(Color::DarkGray),
            )))]
        } else {
            self.entries
                .iter()
                .map(|entry| {
                    let (checkbox, style) = if entry.visible {
                        ("[x]", Style::default().fg(Color::Green))
                    } else {
                        ("[ ]", Style::default())
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(checkbox, style),
                        Span::raw(" "),
                        Span::raw(entry.label.clone()),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entries() -> Vec<ColumnPickerEntry> {
        vec![
            ColumnPickerEntry {
                id: "title".into(),
                label: "Title".into(),
                visible: true,
            },
            ColumnPickerEntry {
                id: "due".into(),
                label: "Due".into(),
                visible: false,
            },
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_toggle_focused_entry() {
        let mut picker = ColumnPicker::new(create_test_entries());
        assert_eq!(
            picker.handle_input(key(KeyCode::Char(' '))),
            Some(ColumnPickerAction::Toggle("title".into()))
        );
        picker.handle_input(key(KeyCode::Char('j')));
        assert_eq!(
            picker.handle_input(key(KeyCode::Enter)),
            Some(ColumnPickerAction::Toggle("due".into()))
        );
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut picker = ColumnPicker::new(create_test_entries());
        picker.handle_input(key(KeyCode::Up));
        assert_eq!(picker.cursor(), 0);
        for _ in 0..5 {
            picker.handle_input(key(KeyCode::Down));
        }
        assert_eq!(picker.cursor(), 1);
    }

    #[test]
    fn test_set_entries_clamps_cursor() {
        let mut picker = ColumnPicker::new(create_test_entries());
        picker.handle_input(key(KeyCode::Down));
        picker.set_entries(create_test_entries()[..1].to_vec());
        assert_eq!(picker.cursor(), 0);
        assert_eq!(picker.entries().len(), 1);
    }

    #[test]
    fn test_bulk_and_close_actions() {
        let mut picker = ColumnPicker::new(create_test_entries());
        assert_eq!(picker.handle_input(key(KeyCode::Char('s'))), Some(ColumnPickerAction::ShowAll));
        assert_eq!(picker.handle_input(key(KeyCode::Char('h'))), Some(ColumnPickerAction::HideAll));
        assert_eq!(picker.handle_input(key(KeyCode::Esc)), Some(ColumnPickerAction::Close));
    }

    #[test]
    fn test_empty_picker() {
        let mut picker = ColumnPicker::new(Vec::new());
        assert_eq!(picker.handle_input(key(KeyCode::Enter)), None);
    }
}
