//! The data-grid engine.
//!
//! A [`DataGrid`] turns a list of rows and a column schema into a filtered,
//! sorted and paginated view with cross-page selection, resizable columns
//! and per-table preferences persisted through a [`Storage`] backend.
//!
//! ```
//! use serde_json::json;
//! use taskgrid::grid::{Column, DataGrid, GridOptions};
//!
//! let rows = vec![
//!     json!({"id": "1", "title": "B", "dueDate": null}),
//!     json!({"id": "2", "title": "A", "dueDate": "2024-01-01"}),
//! ];
//! let columns = vec![
//!     Column::new("title", "Title").sortable().searchable(),
//!     Column::new("dueDate", "Due").sortable(),
//! ];
//! let mut grid = DataGrid::new(rows, columns, GridOptions::new("tasks")).unwrap();
//! grid.sort_by("dueDate");
//! assert_eq!(grid.page_row_ids(), vec!["2", "1"]);
//! ```

mod actions;
mod column;
mod filter;
mod owned;
mod paginate;
mod persist;
mod registry;
mod render;
mod resize;
mod row;
mod selection;
mod sort;
mod table;
mod value;

pub use actions::{ActionHandler, ActionPredicate, ActionVariant, RowAction};
pub use column::{Accessor, CellRenderer, Column, ColumnWidth};
pub use filter::{filter_indices, is_blank, row_matches};
pub use owned::Owned;
pub use paginate::{
    is_valid_page_size, page_range, total_pages, DEFAULT_ITEMS_PER_PAGE, PAGE_SIZE_OPTIONS,
};
pub use persist::{
    DisabledStorage, FileStorage, MemoryStorage, PersistedSlice, PersistenceBridge, Storage,
    StorageError, DEFAULT_NAMESPACE,
};
pub use registry::{ColumnPickerEntry, ColumnRegistry, VisibleColumns};
pub use render::{
    ActionEmphasis, ActionView, CellView, ColumnTemplate, FooterView, GridView, HeaderCell,
    HeaderView, RowView, Track, SELECTION_TRACK_PX,
};
pub use resize::{ColumnWidths, WidthStore, MIN_COLUMN_WIDTH_PX};
pub use row::{positional_id, GridRow, RowIdFn, TableData};
pub use selection::{HeaderCheckState, SelectionManager};
pub use sort::{compare_values, sort_indices, SortDirection, SortState};
pub use table::{
    ConfigChangeHandler, ConfigSnapshot, DataGrid, GridOptions, RowClickHandler,
    SelectionChangeHandler,
};
pub use value::{locale_compare, CellValue};
