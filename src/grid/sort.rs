//! Sort engine: tri-state sort state and the cell comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::column::Column;
use super::row::GridRow;
use super::value::{locale_compare, CellValue};

/// Tri-state sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Unsorted; input order is kept.
    #[default]
    None,
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Next state when the same column is clicked again.
    pub fn cycle(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        }
    }

    /// Header indicator glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::None => "↕",
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// The column being sorted and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortState {
    /// Sorted column id, `None` when unsorted.
    pub column: Option<String>,
    /// Direction; always `None` when `column` is `None`.
    pub direction: SortDirection,
}

impl SortState {
    /// Create a sort state, normalizing a missing column to no direction.
    pub fn new(column: Option<String>, direction: SortDirection) -> Self {
        Self { column, direction }.normalized()
    }

    /// Sort ascending by `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(Some(column.into()), SortDirection::Asc)
    }

    /// Sort descending by `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(Some(column.into()), SortDirection::Desc)
    }

    /// Enforce that a missing column implies no direction.
    pub fn normalized(mut self) -> Self {
        if self.column.is_none() {
            self.direction = SortDirection::None;
        }
        self
    }

    /// Whether rows are actually reordered.
    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.direction != SortDirection::None
    }

    /// State after a header click on `column_id`.
    ///
    /// A different column starts ascending; the same column cycles
    /// none → asc → desc → none.
    pub fn clicked(&self, column_id: &str) -> Self {
        match &self.column {
            Some(current) if current == column_id => Self {
                column: self.column.clone(),
                direction: self.direction.cycle(),
            },
            _ => Self::asc(column_id),
        }
    }

    /// Direction shown on `column_id`'s header.
    pub fn direction_for(&self, column_id: &str) -> SortDirection {
        match &self.column {
            Some(current) if current == column_id => self.direction,
            _ => SortDirection::None,
        }
    }
}

/// Compare two cell values under `direction`.
///
/// Nulls go last regardless of direction. Same-typed text, numbers and
/// dates compare natively; anything else is stringified and compared as
/// text.
pub fn compare_values(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let ordering = match (a, b) {
        (CellValue::Text(x), CellValue::Text(y)) => locale_compare(x, y),
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Date(x), CellValue::Date(y)) => {
            x.timestamp_millis().cmp(&y.timestamp_millis())
        }
        _ => locale_compare(&a.to_display_string(), &b.to_display_string()),
    };

    match direction {
        SortDirection::Desc => ordering.reverse(),
        _ => ordering,
    }
}

/// Reorder `indices` (positions into `rows`) by `column`.
///
/// Equal keys keep their relative input order. When the non-null keys do
/// not all share one variant, every key is compared by its string form so
/// the ordering stays total.
pub fn sort_indices<T: GridRow>(
    rows: &[T],
    indices: &mut [usize],
    column: &Column<T>,
    direction: SortDirection,
) {
    if direction == SortDirection::None {
        return;
    }
    let mut keys: Vec<CellValue> = rows.iter().map(|row| column.value(row)).collect();
    if !is_homogeneous(&keys) {
        trace!(column = %column.id, "Mixed cell types, comparing as text");
        for key in keys.iter_mut().filter(|k| !k.is_null()) {
            *key = CellValue::Text(key.to_display_string());
        }
    }
    indices.sort_by(|&a, &b| compare_values(&keys[a], &keys[b], direction));
    trace!(column = %column.id, ?direction, rows = indices.len(), "Sorted rows");
}

/// Whether all non-null keys are the same variant.
fn is_homogeneous(keys: &[CellValue]) -> bool {
    let mut non_null = keys.iter().filter(|k| !k.is_null());
    match non_null.next() {
        Some(first) => {
            let kind = std::mem::discriminant(first);
            non_null.all(|k| std::mem::discriminant(k) == kind)
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn sorted_ids(rows: &[Value], column: &Column<Value>, direction: SortDirection) -> Vec<String> {
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        sort_indices(rows, &mut indices, column, direction);
        indices
            .into_iter()
            .map(|i| rows[i]["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_cycle_same_column() {
        let mut state = SortState::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            state = state.clicked("title");
            seen.push(state.direction);
        }
        assert_eq!(
            seen,
            vec![
                SortDirection::Asc,
                SortDirection::Desc,
                SortDirection::None,
                SortDirection::Asc,
                SortDirection::Desc,
            ]
        );
    }

    #[test]
    fn test_click_different_column_starts_ascending() {
        let state = SortState::desc("title").clicked("due");
        assert_eq!(state, SortState::asc("due"));

        let from_none = SortState::new(Some("title".into()), SortDirection::None).clicked("due");
        assert_eq!(from_none, SortState::asc("due"));
    }

    #[test]
    fn test_missing_column_normalizes_direction() {
        let state = SortState::new(None, SortDirection::Desc);
        assert_eq!(state.direction, SortDirection::None);
        assert!(!state.is_active());
    }

    #[test]
    fn test_direction_for_other_column_is_none() {
        let state = SortState::asc("title");
        assert_eq!(state.direction_for("title"), SortDirection::Asc);
        assert_eq!(state.direction_for("due"), SortDirection::None);
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let a = CellValue::Null;
        let b = CellValue::Number(1.0);
        assert_eq!(compare_values(&a, &b, SortDirection::Asc), Ordering::Greater);
        assert_eq!(compare_values(&a, &b, SortDirection::Desc), Ordering::Greater);
        assert_eq!(compare_values(&b, &a, SortDirection::Desc), Ordering::Less);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let two = CellValue::Number(2.0);
        let ten = CellValue::Number(10.0);
        assert_eq!(compare_values(&two, &ten, SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_values(&two, &ten, SortDirection::Desc), Ordering::Greater);
    }

    #[test]
    fn test_dates_compare_by_epoch() {
        let early = CellValue::Date(Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap());
        let late = CellValue::Date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(compare_values(&early, &late, SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_values(&early, &late, SortDirection::Desc), Ordering::Greater);
    }

    #[test]
    fn test_mixed_types_compare_as_strings() {
        let number = CellValue::Number(10.0);
        let text = CellValue::Text("9".into());
        assert_eq!(compare_values(&number, &text, SortDirection::Asc), Ordering::Less);
    }

    #[test]
    fn test_scenario_due_date_nulls_last() {
        let rows = vec![
            json!({"id": "1", "title": "B", "dueDate": null}),
            json!({"id": "2", "title": "A", "dueDate": "2024-01-01"}),
        ];
        let due: Column<Value> = Column::new("dueDate", "Due").sortable();
        let title: Column<Value> = Column::new("title", "Title").sortable();

        assert_eq!(sorted_ids(&rows, &due, SortDirection::Asc), vec!["2", "1"]);
        assert_eq!(sorted_ids(&rows, &due, SortDirection::Desc), vec!["2", "1"]);
        assert_eq!(sorted_ids(&rows, &title, SortDirection::Asc), vec!["2", "1"]);
    }

    #[test]
    fn test_desc_reverses_non_null_rows() {
        let rows = vec![
            json!({"id": "a", "n": 3}),
            json!({"id": "b", "n": null}),
            json!({"id": "c", "n": 1}),
            json!({"id": "d", "n": 2}),
            json!({"id": "e"}),
        ];
        let col: Column<Value> = Column::new("n", "N").sortable();
        let asc = sorted_ids(&rows, &col, SortDirection::Asc);
        let desc = sorted_ids(&rows, &col, SortDirection::Desc);
        assert_eq!(asc, vec!["c", "d", "a", "b", "e"]);
        assert_eq!(desc, vec!["a", "d", "c", "b", "e"]);
    }

    #[test]
    fn test_mixed_column_sorts_as_text() {
        let rows = vec![
            json!({"id": "a", "n": 10}),
            json!({"id": "b", "n": "9"}),
            json!({"id": "c", "n": 9}),
            json!({"id": "d", "n": null}),
            json!({"id": "e", "n": "100"}),
        ];
        let col: Column<Value> = Column::new("n", "N").sortable();
        assert_eq!(
            sorted_ids(&rows, &col, SortDirection::Asc),
            vec!["a", "e", "b", "c", "d"]
        );
        assert_eq!(
            sorted_ids(&rows, &col, SortDirection::Desc),
            vec!["b", "c", "e", "a", "d"]
        );
    }

    #[test]
    fn test_nan_sorts_after_numbers() {
        let rows = vec![
            json!({"id": "a"}),
            json!({"id": "b"}),
            json!({"id": "c"}),
        ];
        let col: Column<Value> = Column::new("n", "N")
            .sortable()
            .accessor(|row: &Value| match row["id"].as_str() {
                Some("a") => CellValue::Number(f64::NAN),
                Some("b") => CellValue::Number(2.0),
                _ => CellValue::Number(1.0),
            });
        assert_eq!(sorted_ids(&rows, &col, SortDirection::Asc), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_homogeneous_ignores_nulls() {
        assert!(is_homogeneous(&[CellValue::Null, CellValue::Number(1.0)]));
        assert!(is_homogeneous(&[]));
        assert!(!is_homogeneous(&[CellValue::Number(1.0), CellValue::Text("1".into())]));
    }

    #[test]
    fn test_none_direction_keeps_input_order() {
        let rows = vec![json!({"id": "b", "n": 2}), json!({"id": "a", "n": 1})];
        let col: Column<Value> = Column::new("n", "N").sortable();
        assert_eq!(sorted_ids(&rows, &col, SortDirection::None), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_state_serde_shape() {
        let json = serde_json::to_value(SortState::desc("title")).unwrap();
        assert_eq!(json, json!({"column": "title", "direction": "desc"}));
    }
}
