//! Row access and dataset normalization.

use indexmap::IndexMap;
use serde_json::Value;

use super::value::CellValue;

/// A row that the grid can display.
///
/// `field` resolves a column id to the row's same-named field and is used
/// whenever a column has no explicit accessor.
pub trait GridRow {
    /// Value of the field named `column_id`, or `CellValue::Null` if absent.
    fn field(&self, column_id: &str) -> CellValue;

    /// Stable identity of the row, if the row carries one.
    fn row_id(&self) -> Option<String> {
        None
    }
}

impl GridRow for Value {
    fn field(&self, column_id: &str) -> CellValue {
        self.get(column_id).map(CellValue::from).unwrap_or_default()
    }

    fn row_id(&self) -> Option<String> {
        match self.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Host-supplied identity function.
pub type RowIdFn<T> = std::rc::Rc<dyn Fn(&T) -> String>;

/// Positional identity used when a row has no id of its own.
///
/// This is page-relative, so it does not survive re-sorting or paging.
pub fn positional_id(index_on_page: usize) -> String {
    index_on_page.to_string()
}

/// Input dataset: an ordered list or a keyed mapping.
#[derive(Debug, Clone)]
pub enum TableData<T> {
    /// Rows in display order.
    List(Vec<T>),
    /// Rows keyed by id; insertion order becomes row order.
    Keyed(IndexMap<String, T>),
}

impl<T> TableData<T> {
    /// Normalize into a row list.
    pub fn into_rows(self) -> Vec<T> {
        match self {
            TableData::List(rows) => rows,
            TableData::Keyed(map) => map.into_values().collect(),
        }
    }
}

impl<T> From<Vec<T>> for TableData<T> {
    fn from(rows: Vec<T>) -> Self {
        TableData::List(rows)
    }
}

impl<T> From<IndexMap<String, T>> for TableData<T> {
    fn from(map: IndexMap<String, T>) -> Self {
        TableData::Keyed(map)
    }
}
