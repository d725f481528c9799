//! Terminal user interface for the grid viewer.
//!
//! Components draw [`crate::grid::GridView`] snapshots with ratatui; they
//! never mutate the grid themselves.

mod components;
pub mod theme;

pub use components::{
    cells_to_px, highlight_text, px_to_cells, render_grid, render_help_bar, render_search_bar,
    rendered_widths, ColumnPicker, ColumnPickerAction, GridFocus, HintContext, SearchBar,
    PX_PER_CELL,
};
pub use theme::Theme;
