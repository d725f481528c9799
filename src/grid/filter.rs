//! Free-text filter over searchable columns.

use tracing::trace;

use super::column::Column;
use super::row::GridRow;

/// Whether `term` filters nothing.
pub fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}

/// Case-insensitive substring match against every searchable column.
///
/// `needle` must already be lowercased.
pub fn row_matches<T: GridRow>(row: &T, columns: &[Column<T>], needle: &str) -> bool {
    columns
        .iter()
        .filter(|c| c.searchable)
        .any(|c| c.value(row).to_display_string().to_lowercase().contains(needle))
}

/// Indices of the rows matching `term`, in input order.
///
/// A blank term keeps every row.
pub fn filter_indices<T: GridRow>(rows: &[T], columns: &[Column<T>], term: &str) -> Vec<usize> {
    if is_blank(term) {
        return (0..rows.len()).collect();
    }
    let needle = term.to_lowercase();
    let matched: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row_matches(*row, columns, &needle))
        .map(|(i, _)| i)
        .collect();
    trace!(term, matched = matched.len(), total = rows.len(), "Filtered rows");
    matched
}
