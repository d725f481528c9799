//! Column registry: the schema plus its visible/hidden projection.

use std::collections::{BTreeMap, HashSet};

use super::column::Column;
use crate::error::GridError;

/// Visibility per column id, one entry per column.
pub type VisibleColumns = BTreeMap<String, bool>;

/// Entry of the show/hide column picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPickerEntry {
    /// Column id.
    pub id: String,
    /// Column label.
    pub label: String,
    /// Current visibility.
    pub visible: bool,
}

/// Owns the column schema.
///
/// Visibility itself lives with the grid (it may be host-controlled); the
/// registry computes projections and transitions over a [`VisibleColumns`].
#[derive(Debug, Clone)]
pub struct ColumnRegistry<T> {
    columns: Vec<Column<T>>,
}

impl<T> ColumnRegistry<T> {
    /// Create a registry, rejecting duplicate column ids.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, GridError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(GridError::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// The full schema in declaration order.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Look up a column by id.
    pub fn column(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Schema-derived visibility.
    pub fn default_visibility(&self) -> VisibleColumns {
        self.columns
            .iter()
            .map(|c| (c.id.clone(), c.visible))
            .collect()
    }

    /// Align a stored or host-supplied map with the schema: unknown ids are
    /// dropped and missing ids take their default.
    pub fn reconcile(&self, visibility: &VisibleColumns) -> VisibleColumns {
        self.columns
            .iter()
            .map(|c| {
                let visible = visibility.get(&c.id).copied().unwrap_or(c.visible);
                (c.id.clone(), visible)
            })
            .collect()
    }

    /// Columns shown under `visibility`. Custom-header columns always show.
    pub fn visible<'a>(&'a self, visibility: &VisibleColumns) -> Vec<&'a Column<T>> {
        self.columns
            .iter()
            .filter(|c| !c.is_toggleable() || visibility.get(&c.id).copied().unwrap_or(c.visible))
            .collect()
    }

    /// Visibility after flipping one column, or `None` if the id is unknown
    /// or not toggleable.
    pub fn toggled(&self, visibility: &VisibleColumns, id: &str) -> Option<VisibleColumns> {
        let column = self.column(id)?;
        if !column.is_toggleable() {
            return None;
        }
        let mut next = self.reconcile(visibility);
        let current = next.get(id).copied().unwrap_or(column.visible);
        next.insert(id.to_string(), !current);
        Some(next)
    }

    /// Visibility with every toggleable column set to `visible`; custom-header
    /// columns keep their entry.
    pub fn with_all(&self, visibility: &VisibleColumns, visible: bool) -> VisibleColumns {
        let mut next = self.reconcile(visibility);
        for column in self.columns.iter().filter(|c| c.is_toggleable()) {
            next.insert(column.id.clone(), visible);
        }
        next
    }

    /// Entries for the show/hide picker.
    pub fn picker_entries(&self, visibility: &VisibleColumns) -> Vec<ColumnPickerEntry> {
        self.columns
            .iter()
            .filter(|c| c.is_toggleable())
            .map(|c| ColumnPickerEntry {
                id: c.id.clone(),
                label: c.label.clone(),
                visible: visibility.get(&c.id).copied().unwrap_or(c.visible),
            })
            .collect()
    }
}
