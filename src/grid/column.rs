//! Column schema definitions.

use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::row::GridRow;
use super::value::CellValue;

/// Extracts a cell value from a row.
pub type Accessor<T> = Rc<dyn Fn(&T) -> CellValue>;

/// Renders a cell given its value, the row and the row's page index.
pub type CellRenderer<T> = Rc<dyn Fn(&CellValue, &T, usize) -> String>;

/// A CSS track length for one column.
///
/// Serialized as its CSS string, e.g. `"140px"` or `"1fr"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ColumnWidth {
    /// Absolute width in pixels.
    Px(f64),
    /// Fraction of the remaining space.
    Fr(f64),
    /// Any other CSS length, kept verbatim.
    Other(String),
}

impl ColumnWidth {
    /// Width in pixels.
    pub fn px(value: f64) -> Self {
        ColumnWidth::Px(value)
    }

    /// Fractional width.
    pub fn fr(value: f64) -> Self {
        ColumnWidth::Fr(value)
    }

    /// The pixel value, if this is an absolute width.
    pub fn as_px(&self) -> Option<f64> {
        match self {
            ColumnWidth::Px(v) => Some(*v),
            _ => None,
        }
    }
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Fr(1.0)
    }
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnWidth::Px(v) => write!(f, "{}px", v),
            ColumnWidth::Fr(v) => write!(f, "{}fr", v),
            ColumnWidth::Other(s) => f.write_str(s),
        }
    }
}

impl FromStr for ColumnWidth {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse_unit = |suffix: &str| {
            trimmed
                .strip_suffix(suffix)
                .and_then(|n| n.trim().parse::<f64>().ok())
                .filter(|n| n.is_finite())
        };
        if let Some(v) = parse_unit("px") {
            return Ok(ColumnWidth::Px(v));
        }
        if let Some(v) = parse_unit("fr") {
            return Ok(ColumnWidth::Fr(v));
        }
        Ok(ColumnWidth::Other(trimmed.to_string()))
    }
}

impl From<&str> for ColumnWidth {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(width) => width,
            Err(never) => match never {},
        }
    }
}

impl From<String> for ColumnWidth {
    fn from(s: String) -> Self {
        ColumnWidth::from(s.as_str())
    }
}

impl From<ColumnWidth> for String {
    fn from(width: ColumnWidth) -> Self {
        width.to_string()
    }
}

/// Describes one column of a table.
///
/// Columns are built with chained setters:
///
/// ```
/// use taskgrid::Column;
/// use serde_json::Value;
///
/// let title: Column<Value> = Column::new("title", "Title")
///     .sortable()
///     .searchable()
///     .width("240px");
/// assert!(title.is_sortable());
/// ```
pub struct Column<T> {
    /// Unique, stable identifier within a table.
    pub id: String,
    /// Header label.
    pub label: String,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Whether the free-text filter looks at this column.
    pub searchable: bool,
    /// Default visibility.
    pub visible: bool,
    /// Default width from the schema.
    pub width: Option<ColumnWidth>,
    /// Custom header content. Such columns are neither click-sortable nor
    /// toggleable and are always shown.
    pub header_content: Option<String>,
    /// Marks a column the host only shows to some roles. Carried, not evaluated.
    pub role_restricted: bool,
    accessor: Option<Accessor<T>>,
    render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Create a visible, non-sortable, non-searchable column.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: false,
            searchable: false,
            visible: true,
            width: None,
            header_content: None,
            role_restricted: false,
            accessor: None,
            render: None,
        }
    }

    /// Enable sorting.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Include in free-text search.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Hide by default.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Default width.
    pub fn width(mut self, width: impl Into<ColumnWidth>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Replace the header label with custom content.
    pub fn header_content(mut self, content: impl Into<String>) -> Self {
        self.header_content = Some(content.into());
        self
    }

    /// Mark as role-restricted.
    pub fn role_restricted(mut self) -> Self {
        self.role_restricted = true;
        self
    }

    /// Derive the cell value with a closure instead of the row's field.
    pub fn accessor(mut self, accessor: impl Fn(&T) -> CellValue + 'static) -> Self {
        self.accessor = Some(Rc::new(accessor));
        self
    }

    /// Custom cell rendering.
    pub fn render(mut self, render: impl Fn(&CellValue, &T, usize) -> String + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    /// Click-sortable: flagged sortable and not a custom-header column.
    pub fn is_sortable(&self) -> bool {
        self.sortable && self.header_content.is_none()
    }

    /// Whether the show/hide picker may change this column.
    pub fn is_toggleable(&self) -> bool {
        self.header_content.is_none()
    }

    /// Whether a custom renderer is attached.
    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }
}

impl<T: GridRow> Column<T> {
    /// Resolve the cell value: the accessor's result, falling back to the
    /// row's same-named field when the accessor yields nothing.
    pub fn value(&self, row: &T) -> CellValue {
        match &self.accessor {
            Some(accessor) => match accessor(row) {
                CellValue::Null => row.field(&self.id),
                value => value,
            },
            None => row.field(&self.id),
        }
    }

    /// Render the cell content for `row` at page index `index`.
    pub fn render_cell(&self, row: &T, index: usize) -> String {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(&value, row, index),
            None => value.to_display_string(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            visible: self.visible,
            width: self.width.clone(),
            header_content: self.header_content.clone(),
            role_restricted: self.role_restricted,
            accessor: self.accessor.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("visible", &self.visible)
            .field("width", &self.width)
            .field("header_content", &self.header_content)
            .field("role_restricted", &self.role_restricted)
            .field("accessor", &self.accessor.is_some())
            .field("render", &self.render.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_width_parse_and_display() {
        assert_eq!(ColumnWidth::from("140px"), ColumnWidth::Px(140.0));
        assert_eq!(ColumnWidth::from("1fr"), ColumnWidth::Fr(1.0));
        assert_eq!(ColumnWidth::from("20%"), ColumnWidth::Other("20%".into()));
        assert_eq!(ColumnWidth::Px(140.0).to_string(), "140px");
        assert_eq!(ColumnWidth::Px(90.5).to_string(), "90.5px");
        assert_eq!(ColumnWidth::Fr(2.0).to_string(), "2fr");
    }

    #[test]
    fn test_width_serializes_as_css_string() {
        let json = serde_json::to_string(&ColumnWidth::Px(120.0)).unwrap();
        assert_eq!(json, "\"120px\"");
        let parsed: ColumnWidth = serde_json::from_str("\"3fr\"").unwrap();
        assert_eq!(parsed, ColumnWidth::Fr(3.0));
    }

    #[test]
    fn test_builder_defaults() {
        let col: Column<Value> = Column::new("title", "Title");
        assert!(col.visible);
        assert!(!col.sortable);
        assert!(!col.searchable);
        assert!(col.width.is_none());
        assert!(col.is_toggleable());
    }

    #[test]
    fn test_header_content_disables_sort_and_toggle() {
        let col: Column<Value> = Column::new("select", "").sortable().header_content("*");
        assert!(!col.is_sortable());
        assert!(!col.is_toggleable());
    }

    #[test]
    fn test_value_prefers_accessor() {
        let col: Column<Value> = Column::new("title", "Title")
            .accessor(|row: &Value| CellValue::from(row["name"].as_str()));
        assert_eq!(
            col.value(&json!({"name": "from accessor", "title": "field"})),
            CellValue::Text("from accessor".into())
        );
    }

    #[test]
    fn test_value_falls_back_to_field_when_accessor_empty() {
        let col: Column<Value> =
            Column::new("title", "Title").accessor(|_row: &Value| CellValue::Null);
        assert_eq!(
            col.value(&json!({"title": "field"})),
            CellValue::Text("field".into())
        );
    }

    #[test]
    fn test_render_cell_uses_renderer() {
        let col: Column<Value> = Column::new("points", "Points")
            .render(|value, _row, index| format!("#{} {}", index, value));
        assert_eq!(col.render_cell(&json!({"points": 5}), 2), "#2 5");
    }

    #[test]
    fn test_render_cell_raw_value() {
        let col: Column<Value> = Column::new("points", "Points");
        assert_eq!(col.render_cell(&json!({"points": 5}), 0), "5");
        assert_eq!(col.render_cell(&json!({}), 0), "");
    }
}
