//! Viewer state and event loop.
//!
//! `App::update` applies events to the grid and `App::view` draws the
//! current [`GridView`]. Drawing never mutates the grid.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde_json::Value;
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::error::Result;
use crate::events::Event;
use crate::grid::{
    Column, ConfigSnapshot, DataGrid, GridOptions, GridView, Storage, TableData, PAGE_SIZE_OPTIONS,
};
use crate::ui::{
    render_grid, render_help_bar, render_search_bar, rendered_widths, ColumnPicker,
    ColumnPickerAction, GridFocus, HintContext, SearchBar, Theme, PX_PER_CELL,
};

/// Cells a single `<` or `>` press moves a column edge.
const RESIZE_STEP_CELLS: i16 = 1;

/// What the keyboard is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigating the grid.
    #[default]
    Grid,
    /// Typing a search term.
    Search,
    /// The column picker is open.
    ColumnPicker,
}

/// The viewer application.
pub struct App {
    grid: DataGrid<Value>,
    mode: Mode,
    focus: GridFocus,
    search: SearchBar,
    picker: ColumnPicker,
    theme: Theme,
    title: String,
    /// Width of the table body in cells, as last drawn.
    table_width: u16,
    /// Message set by grid callbacks, shown in the status line.
    status: Rc<RefCell<Option<String>>>,
    should_quit: bool,
}

impl App {
    /// Build the viewer over `data` for the table `table_id`.
    pub fn new(
        data: TableData<Value>,
        columns: Vec<Column<Value>>,
        table_id: &str,
        settings: &Settings,
        storage: Rc<dyn Storage>,
    ) -> Result<Self> {
        let status = Rc::new(RefCell::new(None));
        let click_status = Rc::clone(&status);

        let options = GridOptions::new(table_id)
            .namespace(settings.storage_namespace.clone())
            .shared_storage(storage)
            .selectable(settings.selectable)
            .default_items_per_page(settings.default_items_per_page)
            .on_config_change(|snapshot: &ConfigSnapshot| {
                debug!(
                    sort = ?snapshot.sort,
                    page = snapshot.current_page,
                    page_size = snapshot.items_per_page,
                    "Grid configuration changed"
                );
            })
            .on_row_click(move |row: &Value, index| {
                let text = row.to_string();
                *click_status.borrow_mut() = Some(format!("Row {}: {}", index + 1, text));
            });

        let grid = DataGrid::new(data, columns, options)?;
        info!(table_id, rows = grid.rows().len(), "Viewer ready");

        Ok(Self {
            grid,
            mode: Mode::Grid,
            focus: GridFocus {
                column: 0,
                row: Some(0),
            },
            search: SearchBar::new(),
            picker: ColumnPicker::default(),
            theme: Theme::default(),
            title: format!(" {} ", table_id),
            table_width: 0,
            status,
            should_quit: false,
        })
    }

    /// The grid being viewed.
    pub fn grid(&self) -> &DataGrid<Value> {
        &self.grid
    }

    /// Current input mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Focus within the grid.
    pub fn focus(&self) -> GridFocus {
        self.focus
    }

    /// Status message from the last row click.
    pub fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }

    /// Whether the viewer should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.should_quit = true;
                    return;
                }
                match self.mode {
                    Mode::Grid => self.handle_grid_key(key),
                    Mode::Search => self.handle_search_key(key),
                    Mode::ColumnPicker => self.handle_picker_key(key),
                }
                self.clamp_focus();
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    fn focused_column_id(&self) -> Option<String> {
        self.grid
            .visible_columns()
            .get(self.focus.column)
            .map(|c| c.id.clone())
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.focus.column = self.focus.column.saturating_sub(1),
            KeyCode::Right => self.focus.column += 1,
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.focused_column_id() {
                    self.grid.handle_header_key(&id, key);
                }
            }
            KeyCode::Char('/') => {
                self.search.activate();
                self.mode = Mode::Search;
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('x') => {
                if let Some(id) = self.cursor_row_id() {
                    self.grid.toggle_row(&id);
                }
            }
            KeyCode::Char('a') => self.grid.select_all(true),
            KeyCode::Char('A') => self.grid.select_all(false),
            KeyCode::Char('n') | KeyCode::PageDown => {
                self.grid.next_page();
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                self.grid.prev_page();
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.grid.first_page();
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.grid.last_page();
            }
            KeyCode::Char('+') => self.cycle_page_size(),
            KeyCode::Char('<') => self.resize_focused(-RESIZE_STEP_CELLS),
            KeyCode::Char('>') => self.resize_focused(RESIZE_STEP_CELLS),
            KeyCode::Char('v') => {
                if let Some(id) = self.focused_column_id() {
                    self.grid.toggle_column(&id);
                }
            }
            KeyCode::Char('s') => self.grid.show_all_columns(),
            KeyCode::Char('h') => self.grid.hide_all_columns(),
            KeyCode::Char('c') => {
                self.picker = ColumnPicker::new(self.grid.view().column_picker);
                self.mode = Mode::ColumnPicker;
            }
            KeyCode::Char('o') => {
                if let Some(row) = self.focus.row {
                    self.grid.click_row(row);
                }
            }
            KeyCode::Char('r') => {
                self.grid.reset_preferences();
                *self.status.borrow_mut() = Some("Preferences reset".to_string());
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.search.commit();
                self.mode = Mode::Grid;
            }
            KeyCode::Esc => {
                self.search.cancel();
                self.grid.set_search_term("");
                self.mode = Mode::Grid;
            }
            KeyCode::Backspace => {
                self.search.pop_char();
                self.grid.set_search_term(self.search.query());
            }
            KeyCode::Char(c) => {
                self.search.push_char(c);
                self.grid.set_search_term(self.search.query());
            }
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(action) = self.picker.handle_input(key) else {
            return;
        };
        match action {
            ColumnPickerAction::Toggle(id) => {
                self.grid.toggle_column(&id);
            }
            ColumnPickerAction::ShowAll => self.grid.show_all_columns(),
            ColumnPickerAction::HideAll => self.grid.hide_all_columns(),
            ColumnPickerAction::Close => self.mode = Mode::Grid,
        }
        self.picker.set_entries(self.grid.view().column_picker);
    }

    fn cursor_row_id(&self) -> Option<String> {
        self.focus
            .row
            .and_then(|row| self.grid.page_row_ids().get(row).cloned())
    }

    fn move_cursor(&mut self, delta: isize) {
        let rows = self.grid.page_rows().len();
        if rows == 0 {
            return;
        }
        let current = self.focus.row.unwrap_or(0);
        self.focus.row = Some(current.saturating_add_signed(delta).min(rows - 1));
    }

    fn cycle_page_size(&mut self) {
        let current = self.grid.items_per_page();
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|&size| size > current)
            .unwrap_or(PAGE_SIZE_OPTIONS[0]);
        self.grid.set_items_per_page(next);
    }

    /// Emulate dragging the focused column's right edge by `delta` cells.
    fn resize_focused(&mut self, delta: i16) {
        let Some(id) = self.focused_column_id() else {
            return;
        };
        let rendered = rendered_widths(&self.grid.view(), self.table_width);
        if self.grid.begin_resize(&id, 0.0, &rendered) {
            self.grid.drag_resize(f64::from(delta) * PX_PER_CELL);
            self.grid.end_resize();
        }
    }

    fn clamp_focus(&mut self) {
        let columns = self.grid.visible_columns().len();
        self.focus.column = self.focus.column.min(columns.saturating_sub(1));

        let rows = self.grid.page_rows().len();
        self.focus.row = match (rows, self.focus.row) {
            (0, _) => None,
            (n, Some(row)) => Some(row.min(n - 1)),
            (_, None) => Some(0),
        };
        self.grid.set_hovered_row(self.focus.row);
    }

    /// Draw the viewer.
    pub fn view(&mut self, frame: &mut Frame) {
        let [search_area, table_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.table_width = table_area.width.saturating_sub(2);
        let view = self.grid.view();

        render_search_bar(frame, search_area, &self.search, self.grid.filtered_count());
        render_grid(
            frame,
            table_area,
            &view,
            self.focus,
            &self.theme,
            self.grid.search_term(),
            &self.title,
        );
        self.render_status(frame, status_area, &view);

        let context = match self.mode {
            Mode::Grid => HintContext::Grid,
            Mode::Search => HintContext::Search,
            Mode::ColumnPicker => HintContext::ColumnPicker,
        };
        render_help_bar(frame, help_area, context);

        if self.mode == Mode::ColumnPicker {
            self.picker.render(frame, popup_area(table_area, 40, 12));
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, view: &GridView) {
        let footer = &view.footer;
        let mut spans = vec![
            Span::styled(
                format!(" {} ", footer.page_info()),
                Style::default().fg(Color::Black).bg(self.theme.accent),
            ),
            Span::raw(" "),
            Span::raw(footer.summary()),
            Span::styled(
                format!("  {}/page", footer.items_per_page),
                self.theme.muted_style(),
            ),
        ];
        let selected = self.grid.selected_ids().len();
        if selected > 0 {
            spans.push(Span::styled(
                format!("  {} selected", selected),
                Style::default().fg(self.theme.selected),
            ));
        }
        if let Some(status) = self.status.borrow().as_deref() {
            spans.push(Span::styled(format!("  {}", status), self.theme.muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// A `width` x `height` rectangle centered in `area`.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{MemoryStorage, SortState};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn create_test_app(rows: usize) -> App {
        let data: Vec<Value> = (0..rows)
            .map(|i| json!({"id": format!("r{}", i), "title": format!("Row {:02}", i), "size": i}))
            .collect();
        let columns = vec![
            Column::new("title", "Title").sortable().searchable(),
            Column::new("size", "Size").sortable(),
        ];
        App::new(
            TableData::List(data),
            columns,
            "rows",
            &Settings::default(),
            Rc::new(MemoryStorage::new()),
        )
        .unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.update(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app(3);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = create_test_app(3);
        app.update(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.should_quit());
    }

    #[test]
    fn test_sort_focused_column() {
        let mut app = create_test_app(3);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.grid().sort_state(), &SortState::desc("size"));
    }

    #[test]
    fn test_focus_is_clamped() {
        let mut app = create_test_app(3);
        for _ in 0..5 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.focus().column, 1);
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.focus().row, Some(2));
    }

    #[test]
    fn test_search_mode() {
        let mut app = create_test_app(15);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode(), Mode::Search);
        for c in "row 1".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.grid().filtered_count(), 5);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), Mode::Grid);
        assert_eq!(app.grid().search_term(), "row 1");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.grid().filtered_count(), 15);
    }

    #[test]
    fn test_selection_keys() {
        let mut app = create_test_app(12);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.grid().is_selected("r0"));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.grid().selected_ids().len(), 3);
        press(&mut app, KeyCode::Char('A'));
        assert!(app.grid().selected_ids().is_empty());
    }

    #[test]
    fn test_page_size_cycle() {
        let mut app = create_test_app(3);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.grid().items_per_page(), 20);
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.grid().items_per_page(), 5);
    }

    #[test]
    fn test_resize_after_draw() {
        let mut app = create_test_app(3);
        draw(&mut app);
        press(&mut app, KeyCode::Char('>'));
        let width = app.grid().column_width("title").and_then(|w| w.as_px()).unwrap();
        assert!(width >= 90.0);
        assert!(app.grid().column_width("size").and_then(|w| w.as_px()).is_some());
        for _ in 0..40 {
            press(&mut app, KeyCode::Char('<'));
        }
        assert_eq!(app.grid().column_width("title").and_then(|w| w.as_px()), Some(90.0));
    }

    #[test]
    fn test_column_picker_flow() {
        let mut app = create_test_app(3);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.mode(), Mode::ColumnPicker);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.grid().visible_columns().len(), 1);
        draw(&mut app);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Grid);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_row_click_sets_status() {
        let mut app = create_test_app(3);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('o'));
        assert!(app.status().unwrap().starts_with("Row 2:"));
    }

    #[test]
    fn test_view_renders_all_parts() {
        let mut app = create_test_app(12);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Title"));
        assert!(text.contains("Row 00"));
        assert!(text.contains("Showing 1-10 of 12"));
        assert!(text.contains("Page 1 of 2"));
    }
}
