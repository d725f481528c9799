//! Loading JSON datasets for the viewer.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::grid::{CellValue, Column, TableData};

/// Load rows from a JSON file holding an array of objects or an object of
/// objects keyed by id.
pub fn load(path: &Path) -> Result<TableData<Value>> {
    let content = fs::read_to_string(path)?;
    let data = parse(&content)?;
    info!(path = %path.display(), "Loaded dataset");
    Ok(data)
}

/// Parse a JSON dataset.
pub fn parse(content: &str) -> Result<TableData<Value>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Array(rows) => Ok(TableData::List(rows)),
        Value::Object(map) => {
            let keyed: IndexMap<String, Value> = map.into_iter().collect();
            Ok(TableData::Keyed(keyed))
        }
        other => Err(AppError::other(format!(
            "Expected a JSON array or object of rows, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turn `snake_case` or `camelCase` keys into a header label.
pub fn label_for(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.chars() {
        if c == '_' || c == '-' {
            label.push(' ');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            label.push(' ');
        }
        if label.is_empty() {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    label
}

/// Columns from the first row's keys, in key order.
///
/// Every column is sortable. Text columns are searchable. Nested objects and
/// arrays are shown as JSON text. The `id` column starts hidden.
pub fn infer_columns(rows: &TableData<Value>) -> Vec<Column<Value>> {
    let first = match rows {
        TableData::List(rows) => rows.first(),
        TableData::Keyed(rows) => rows.values().next(),
    };
    let Some(Value::Object(fields)) = first else {
        debug!("No object rows to infer columns from");
        return Vec::new();
    };

    fields
        .iter()
        .map(|(key, value)| {
            let mut column = Column::new(key.clone(), label_for(key)).sortable();
            match value {
                Value::String(_) => column = column.searchable(),
                Value::Array(_) | Value::Object(_) => {
                    let field = key.clone();
                    column = column.accessor(move |row: &Value| {
                        row.get(&field)
                            .map(|v| CellValue::Text(v.to_string()))
                            .unwrap_or_default()
                    });
                }
                _ => {}
            }
            if key == "id" {
                column = column.hidden();
            }
            column
        })
        .collect()
}
