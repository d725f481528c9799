//! Width store: per-column widths and drag-to-resize tracking.

use std::collections::BTreeMap;

use tracing::debug;

use super::column::{Column, ColumnWidth};

/// Narrowest width a drag can produce, in pixels.
pub const MIN_COLUMN_WIDTH_PX: f64 = 90.0;

/// Explicit widths per column id. Only explicitly sized columns have entries.
pub type ColumnWidths = BTreeMap<String, ColumnWidth>;

/// An in-progress drag.
#[derive(Debug, Clone, PartialEq)]
struct ResizeSession {
    column_id: String,
    start_x: f64,
    start_width: f64,
}

/// Tracks column widths and at most one active resize.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidthStore {
    widths: ColumnWidths,
    active: Option<ResizeSession>,
}

impl WidthStore {
    /// Create a store seeded with `widths`.
    pub fn new(widths: ColumnWidths) -> Self {
        Self {
            widths,
            active: None,
        }
    }

    /// Explicit widths.
    pub fn widths(&self) -> &ColumnWidths {
        &self.widths
    }

    /// Resolved width: explicit entry, then the schema default, then `1fr`.
    pub fn width_for<T>(&self, column: &Column<T>) -> ColumnWidth {
        self.widths
            .get(&column.id)
            .or(column.width.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    /// Set one explicit width.
    pub fn set_width(&mut self, column_id: impl Into<String>, width: ColumnWidth) {
        self.widths.insert(column_id.into(), width);
    }

    /// Drop all explicit widths.
    pub fn clear(&mut self) {
        self.widths.clear();
        self.active = None;
    }

    /// Column currently being dragged.
    pub fn active_column(&self) -> Option<&str> {
        self.active.as_ref().map(|s| s.column_id.as_str())
    }

    /// Whether a drag is in progress.
    pub fn is_resizing(&self) -> bool {
        self.active.is_some()
    }

    /// Start dragging `column_id`'s edge at `start_x`.
    ///
    /// `rendered` holds the current on-screen pixel width of every visible
    /// column. All of them are frozen into the store so the rest of the row
    /// does not reflow during the drag. Any stale drag is replaced.
    ///
    /// Returns `false` if `column_id` is not among the rendered columns.
    pub fn begin_resize(&mut self, column_id: &str, start_x: f64, rendered: &[(String, f64)]) -> bool {
        let Some(start_width) = rendered
            .iter()
            .find(|(id, _)| id == column_id)
            .map(|(_, width)| *width)
        else {
            debug!(column_id, "Ignoring resize of a column that is not rendered");
            return false;
        };

        for (id, width) in rendered {
            self.widths.insert(id.clone(), ColumnWidth::Px(*width));
        }
        self.active = Some(ResizeSession {
            column_id: column_id.to_string(),
            start_x,
            start_width,
        });
        debug!(column_id, start_x, start_width, "Resize started");
        true
    }

    /// Apply a pointer move. Returns the new width, or `None` without an
    /// active drag.
    pub fn drag_to(&mut self, current_x: f64) -> Option<f64> {
        let session = self.active.as_ref()?;
        let width = (session.start_width + (current_x - session.start_x)).max(MIN_COLUMN_WIDTH_PX);
        self.widths
            .insert(session.column_id.clone(), ColumnWidth::Px(width));
        Some(width)
    }

    /// Stop tracking. Widths are kept.
    pub fn end_resize(&mut self) -> bool {
        self.active.take().is_some()
    }
}
