//! Reusable UI components.

mod column_picker;
mod help_bar;
mod search_bar;
mod table;

pub use column_picker::{ColumnPicker, ColumnPickerAction};
pub use help_bar::{render_help_bar, HintContext};
pub use search_bar::{highlight_text, render_search_bar, SearchBar};
pub use table::{cells_to_px, px_to_cells, render_grid, rendered_widths, GridFocus, PX_PER_CELL};
