//! Terminal rendering of a [`GridView`].
//!
//! Column templates are expressed in pixels; one terminal cell stands for
//! [`PX_PER_CELL`] pixels.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::search_bar::highlight_text;
use crate::grid::{ActionEmphasis, ColumnWidth, GridView, HeaderCheckState, Track};
use crate::ui::theme::Theme;

/// Pixels represented by one terminal cell.
pub const PX_PER_CELL: f64 = 8.0;

/// Gap between columns, in cells.
pub const COLUMN_SPACING: u16 = 1;

/// Convert a pixel width to whole cells.
pub fn px_to_cells(px: f64) -> u16 {
    (px / PX_PER_CELL).round().clamp(1.0, f64::from(u16::MAX)) as u16
}

/// Convert cells back to pixels.
pub fn cells_to_px(cells: u16) -> f64 {
    f64::from(cells) * PX_PER_CELL
}

fn track_constraint(track: &Track, actions_width: u16) -> Constraint {
    match track {
        Track::Selection => Constraint::Length(3),
        Track::Column { width, .. } => match width {
            ColumnWidth::Px(px) => Constraint::Length(px_to_cells(*px)),
            ColumnWidth::Fr(fr) => Constraint::Fill(fr.round().max(1.0) as u16),
            ColumnWidth::Other(_) => Constraint::Fill(1),
        },
        Track::Actions => Constraint::Length(actions_width),
    }
}

fn actions_width(view: &GridView) -> u16 {
    view.rows
        .iter()
        .map(|row| {
            row.actions
                .iter()
                .map(|a| a.label.chars().count() + 2)
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0) as u16
}

/// Layout constraints for every track of `view`'s template.
pub fn column_constraints(view: &GridView) -> Vec<Constraint> {
    let actions = actions_width(view);
    view.template
        .tracks
        .iter()
        .map(|t| track_constraint(t, actions))
        .collect()
}

/// Pixel width each data column gets when the table body is `width` cells
/// wide.
pub fn rendered_widths(view: &GridView, width: u16) -> Vec<(String, f64)> {
    let areas = Layout::horizontal(column_constraints(view))
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(Rect::new(0, 0, width, 1));
    view.template
        .tracks
        .iter()
        .zip(areas.iter())
        .filter_map(|(track, area)| match track {
            Track::Column { id, .. } => Some((id.clone(), cells_to_px(area.width))),
            _ => None,
        })
        .collect()
}

fn header_checkbox(state: HeaderCheckState) -> &'static str {
    if state.all_selected {
        "[x]"
    } else if state.some_selected {
        "[-]"
    } else {
        "[ ]"
    }
}

/// Cursor and focus for drawing a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridFocus {
    /// Focused visible column.
    pub column: usize,
    /// Cursor row on the current page.
    pub row: Option<usize>,
}

/// Draw the header and rows of `view` inside a bordered block.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    view: &GridView,
    focus: GridFocus,
    theme: &Theme,
    query: &str,
    title: &str,
) {
    let mut header_cells = Vec::with_capacity(view.template.tracks.len());
    if let Some(state) = view.header.selection {
        header_cells.push(Cell::from(header_checkbox(state)));
    }
    header_cells.extend(view.header.cells.iter().enumerate().map(|(i, cell)| {
        Cell::from(cell.title()).style(theme.header_style(i == focus.column))
    }));
    header_cells.push(Cell::from(view.header.controls.clone().unwrap_or_default()));

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(view.template.tracks.len());
            if let Some(selected) = row.selected {
                let (mark, style) = if selected {
                    ("[x]", Style::default().fg(theme.selected))
                } else {
                    ("[ ]", Style::default().fg(theme.fg))
                };
                cells.push(Cell::from(Span::styled(mark, style)));
            }
            cells.extend(row.cells.iter().map(|c| Cell::from(highlight_text(&c.text, query))));

            let actions: Vec<Span> = row
                .actions
                .iter()
                .map(|a| {
                    let style = match (a.disabled, a.emphasis) {
                        (true, _) => theme.muted_style().add_modifier(Modifier::CROSSED_OUT),
                        (false, ActionEmphasis::Prominent) => {
                            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                        }
                        (false, ActionEmphasis::Muted) => theme.muted_style(),
                    };
                    Span::styled(format!("[{}]", a.label), style)
                })
                .collect();
            cells.push(Cell::from(Line::from(actions)));
            Row::new(cells)
        })
        .collect();

    let table = Table::new(rows, column_constraints(view))
        .header(Row::new(header_cells).bottom_margin(1))
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .highlight_style(theme.cursor_style())
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        );

    let mut state = TableState::default().with_selected(focus.row);
    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Column, DataGrid, GridOptions};
    use serde_json::{json, Value};

    fn create_test_view() -> GridView {
        let rows = vec![json!({"id": 1, "title": "Write docs", "points": 3})];
        let columns: Vec<Column<Value>> = vec![
            Column::new("title", "Title").width("160px"),
            Column::new("points", "Points"),
        ];
        DataGrid::new(rows, columns, GridOptions::new("tasks"))
            .unwrap()
            .view()
    }

    #[test]
    fn test_px_cell_conversion() {
        assert_eq!(px_to_cells(160.0), 20);
        assert_eq!(px_to_cells(90.0), 11);
        assert_eq!(px_to_cells(1.0), 1);
        assert_eq!(cells_to_px(12), 96.0);
    }

    #[test]
    fn test_column_constraints() {
        let constraints = column_constraints(&create_test_view());
        assert_eq!(
            constraints,
            vec![
                Constraint::Length(3),
                Constraint::Length(20),
                Constraint::Fill(1),
                Constraint::Length(0),
            ]
        );
    }

    #[test]
    fn test_rendered_widths_cover_data_columns() {
        let widths = rendered_widths(&create_test_view(), 60);
        assert_eq!(widths.len(), 2);
        assert_eq!(widths[0], ("title".to_string(), 160.0));
        assert!(widths[1].1 > 0.0);
    }

    #[test]
    fn test_header_checkbox() {
        assert_eq!(header_checkbox(HeaderCheckState::default()), "[ ]");
        assert_eq!(
            header_checkbox(HeaderCheckState {
                all_selected: false,
                some_selected: true
            }),
            "[-]"
        );
        assert_eq!(
            header_checkbox(HeaderCheckState {
                all_selected: true,
                some_selected: false
            }),
            "[x]"
        );
    }
}
