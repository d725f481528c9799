//! Cell values produced by column accessors.
//!
//! Every column resolves a row to a [`CellValue`]. Sorting, filtering and
//! default rendering all operate on this closed set of variants so the engine
//! stays generic over the row type.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// A single value extracted from a row for one column.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing or undefined value. Always sorts last.
    #[default]
    Null,
    /// Free text.
    Text(String),
    /// Any numeric value.
    Number(f64),
    /// Boolean flag.
    Bool(bool),
    /// A point in time, compared by epoch milliseconds.
    Date(DateTime<Utc>),
}

impl CellValue {
    /// Check if the value is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Stringified form used for searching, mixed-type comparison and
    /// default rendering. `Null` stringifies to an empty string.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(d) => d.to_rfc3339(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

/// Integral floats print without a fractional part.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Locale-style string comparison.
///
/// Compares case-insensitively first; ties are broken so that lowercase
/// sorts before uppercase, matching the default collation of common locales.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| b.cmp(a))
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Date(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        match value.and_hms_opt(0, 0, 0) {
            Some(midnight) => CellValue::Date(midnight.and_utc()),
            None => CellValue::Null,
        }
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}
