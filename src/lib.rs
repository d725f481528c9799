//! taskgrid - a generic data-grid engine with a terminal viewer.
//!
//! The [`grid`] module is the engine: filtering, tri-state sorting,
//! pagination, cross-page selection, column resizing and persisted per-table
//! preferences over any row type implementing [`GridRow`]. The remaining
//! modules make up the `taskgrid` binary that browses JSON datasets.

pub mod app;
pub mod config;
pub mod dataset;
pub mod error;
pub mod events;
pub mod grid;
pub mod logging;
pub mod ui;

pub use error::{AppError, GridError};
pub use grid::{
    CellValue, Column, ColumnWidth, DataGrid, GridOptions, GridRow, GridView, MemoryStorage,
    RowAction, SortDirection, SortState, Storage, TableData,
};
