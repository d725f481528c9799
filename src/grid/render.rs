//! View models composed from a [`DataGrid`] for a front end to draw.

use std::fmt;

use super::actions::ActionVariant;
use super::column::ColumnWidth;
use super::paginate::{page_range, PAGE_SIZE_OPTIONS};
use super::registry::ColumnPickerEntry;
use super::row::GridRow;
use super::selection::HeaderCheckState;
use super::sort::SortDirection;
use super::table::DataGrid;
use super::value::CellValue;

/// Width of the leading checkbox track.
pub const SELECTION_TRACK_PX: f64 = 48.0;

/// One track of the column template.
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    /// Leading checkbox column.
    Selection,
    /// A data column.
    Column { id: String, width: ColumnWidth },
    /// Trailing row-actions column, sized to its content.
    Actions,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Selection => write!(f, "{}", ColumnWidth::Px(SELECTION_TRACK_PX)),
            Track::Column { width, .. } => write!(f, "{}", width),
            Track::Actions => f.write_str("max-content"),
        }
    }
}

/// Ordered tracks shared by the header and every row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnTemplate {
    pub tracks: Vec<Track>,
}

impl ColumnTemplate {
    /// CSS grid template, e.g. `48px 140px 1fr max-content`.
    pub fn css(&self) -> String {
        self.tracks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub column_id: String,
    pub label: String,
    /// Custom header content; such cells carry no sort control.
    pub content: Option<String>,
    pub sortable: bool,
    pub direction: SortDirection,
    pub width: ColumnWidth,
}

impl HeaderCell {
    /// Sort indicator, or `None` for non-sortable cells.
    pub fn indicator(&self) -> Option<&'static str> {
        self.sortable.then(|| self.direction.glyph())
    }

    /// Text to draw: custom content, else the label with its indicator.
    pub fn title(&self) -> String {
        match (&self.content, self.indicator()) {
            (Some(content), _) => content.clone(),
            (None, Some(glyph)) => format!("{} {}", self.label, glyph),
            (None, None) => self.label.clone(),
        }
    }
}

/// The header row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    /// Checkbox state; `None` when selection is disabled.
    pub selection: Option<HeaderCheckState>,
    pub cells: Vec<HeaderCell>,
    /// Host content for the header's action area.
    pub controls: Option<String>,
}

/// A rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub column_id: String,
    pub value: CellValue,
    pub text: String,
}

/// How prominently a row's actions are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEmphasis {
    /// Hovered or focused row.
    Prominent,
    /// Every other row.
    Muted,
}

/// A row action as drawn on one row.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionView {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub variant: ActionVariant,
    pub disabled: bool,
    pub emphasis: ActionEmphasis,
}

/// A body row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Row identity.
    pub id: String,
    /// Position on the current page.
    pub index: usize,
    /// Checkbox state; `None` when selection is disabled.
    pub selected: Option<bool>,
    pub hovered: bool,
    pub cells: Vec<CellView>,
    pub actions: Vec<ActionView>,
}

/// Pagination footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub current_page: usize,
    pub total_pages: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    /// 1-based first row shown, 0 when empty.
    pub range_start: usize,
    /// 1-based last row shown, 0 when empty.
    pub range_end: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub page_sizes: Vec<usize>,
}

impl FooterView {
    /// "Showing x-y of z".
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {}",
            self.range_start, self.range_end, self.total_items
        )
    }

    /// "Page n of m", 1-based.
    pub fn page_info(&self) -> String {
        let page = if self.total_pages == 0 { 0 } else { self.current_page + 1 };
        format!("Page {} of {}", page, self.total_pages)
    }
}

/// Everything needed to draw one frame of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub template: ColumnTemplate,
    pub header: HeaderView,
    pub rows: Vec<RowView>,
    pub footer: FooterView,
    pub column_picker: Vec<ColumnPickerEntry>,
}

impl GridView {
    /// CSS grid template of header and rows.
    pub fn template_css(&self) -> String {
        self.template.css()
    }
}

impl<T: GridRow> DataGrid<T> {
    /// Compose the current state into a [`GridView`].
    pub fn view(&self) -> GridView {
        let visible = self.visible_columns();
        let sort = self.sort.get();

        let mut tracks = Vec::with_capacity(visible.len() + 2);
        if self.selectable {
            tracks.push(Track::Selection);
        }
        tracks.extend(visible.iter().map(|c| Track::Column {
            id: c.id.clone(),
            width: self.widths.width_for(c),
        }));
        tracks.push(Track::Actions);

        let header = HeaderView {
            selection: self.selectable.then(|| self.header_check_state()),
            cells: visible
                .iter()
                .map(|c| HeaderCell {
                    column_id: c.id.clone(),
                    label: c.label.clone(),
                    content: c.header_content.clone(),
                    sortable: c.is_sortable(),
                    direction: sort.direction_for(&c.id),
                    width: self.widths.width_for(c),
                })
                .collect(),
            controls: self.header_controls.clone(),
        };

        let rows = self
            .page_indices()
            .iter()
            .enumerate()
            .map(|(index, &row_index)| {
                let row = &self.rows[row_index];
                let id = self.identity(row, index);
                let hovered = self.hovered_row == Some(index);
                let emphasis = if hovered {
                    ActionEmphasis::Prominent
                } else {
                    ActionEmphasis::Muted
                };
                RowView {
                    selected: self.selectable.then(|| self.is_selected(&id)),
                    id,
                    index,
                    hovered,
                    cells: visible
                        .iter()
                        .map(|c| CellView {
                            column_id: c.id.clone(),
                            value: c.value(row),
                            text: c.render_cell(row, index),
                        })
                        .collect(),
                    actions: self
                        .row_actions
                        .iter()
                        .map(|a| ActionView {
                            id: a.id.clone(),
                            label: a.label.clone(),
                            icon: a.icon.clone(),
                            variant: a.variant,
                            disabled: a.is_disabled(row),
                            emphasis,
                        })
                        .collect(),
                }
            })
            .collect();

        let total_items = self.filtered_count();
        let range = page_range(total_items, self.current_page(), self.items_per_page());
        let (range_start, range_end) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };
        let total_pages = self.total_pages();
        let footer = FooterView {
            current_page: self.current_page(),
            total_pages,
            items_per_page: self.items_per_page(),
            total_items,
            range_start,
            range_end,
            has_prev: self.current_page() > 0,
            has_next: self.current_page() + 1 < total_pages,
            page_sizes: PAGE_SIZE_OPTIONS.to_vec(),
        };

        GridView {
            template: ColumnTemplate { tracks },
            header,
            rows,
            footer,
            column_picker: self.registry.picker_entries(self.visible.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::actions::RowAction;
    use crate::grid::column::Column;
    use crate::grid::table::GridOptions;
    use serde_json::{json, Value};

    fn create_test_grid(options: GridOptions<Value>) -> DataGrid<Value> {
        let rows: Vec<Value> = (0..12)
            .map(|i| json!({"id": i, "title": format!("Task {}", i), "owner": null}))
            .collect();
        let columns = vec![
            Column::new("title", "Title").sortable().searchable().width("140px"),
            Column::new("owner", "Owner").render(|v: &CellValue, _: &Value, _| {
                if v.is_null() { "-".to_string() } else { v.to_display_string() }
            }),
            Column::new("menu", "Menu").header_content("⋯"),
        ];
        DataGrid::new(rows, columns, options).unwrap()
    }

    #[test]
    fn test_template_css() {
        let grid = create_test_grid(GridOptions::new("tasks"));
        assert_eq!(grid.view().template_css(), "48px 140px 1fr 1fr max-content");

        let grid = create_test_grid(GridOptions::new("tasks").selectable(false));
        assert_eq!(grid.view().template_css(), "140px 1fr 1fr max-content");
    }

    #[test]
    fn test_header_cells() {
        let mut grid = create_test_grid(GridOptions::new("tasks"));
        grid.sort_by("title");
        let header = grid.view().header;
        assert_eq!(header.cells[0].title(), "Title ↑");
        assert_eq!(header.cells[1].title(), "Owner");
        assert_eq!(header.cells[2].title(), "⋯");
        assert!(!header.cells[2].sortable);
        assert_eq!(header.selection, Some(HeaderCheckState::default()));
    }

    #[test]
    fn test_row_cells_use_renderer() {
        let grid = create_test_grid(GridOptions::new("tasks"));
        let view = grid.view();
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows[0].id, "0");
        assert_eq!(view.rows[0].cells[0].text, "Task 0");
        assert_eq!(view.rows[0].cells[1].text, "-");
        assert_eq!(view.rows[0].selected, Some(false));
    }

    #[test]
    fn test_action_emphasis_follows_hover() {
        let mut grid = create_test_grid(
            GridOptions::new("tasks").row_action(RowAction::new("edit", "Edit", |_: &Value, _| {})),
        );
        grid.set_hovered_row(Some(1));
        let view = grid.view();
        assert_eq!(view.rows[0].actions[0].emphasis, ActionEmphasis::Muted);
        assert_eq!(view.rows[1].actions[0].emphasis, ActionEmphasis::Prominent);
        assert!(view.rows[1].hovered);
    }

    #[test]
    fn test_footer() {
        let mut grid = create_test_grid(GridOptions::new("tasks"));
        let footer = grid.view().footer;
        assert_eq!(footer.summary(), "Showing 1-10 of 12");
        assert_eq!(footer.page_info(), "Page 1 of 2");
        assert!(!footer.has_prev);
        assert!(footer.has_next);

        grid.next_page();
        let footer = grid.view().footer;
        assert_eq!(footer.summary(), "Showing 11-12 of 12");
        assert!(footer.has_prev);
        assert!(!footer.has_next);

        grid.set_search_term("nothing matches");
        let footer = grid.view().footer;
        assert_eq!(footer.summary(), "Showing 0-0 of 0");
        assert_eq!(footer.page_info(), "Page 0 of 0");
    }

    #[test]
    fn test_column_picker_excludes_custom_headers() {
        let grid = create_test_grid(GridOptions::new("tasks"));
        let ids: Vec<String> = grid.view().column_picker.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["title", "owner"]);
    }
}
