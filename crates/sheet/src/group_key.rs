//! Grouping keys derived from a row's first cell.
//!
//! The first column holds timestamp-like text such as `5/25/2024 9:00`; the
//! key is the date portion before the first whitespace character.

use crate::cell::Cell;
use crate::matrix::{Matrix, Row};
use indexmap::IndexSet;

/// Derive the grouping key of a cell. Absent cells yield an empty key.
#[must_use]
pub fn extract_key(cell: Option<&Cell>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };
    let text = cell.display();
    match text.find(char::is_whitespace) {
        Some(end) => text[..end].to_string(),
        None => text,
    }
}

/// Grouping key of a row, read from column 0.
#[must_use]
pub fn row_key(row: &Row) -> String {
    extract_key(row.first())
}

/// Distinct keys over the data rows, in first-seen order.
#[must_use]
pub fn distinct_keys(matrix: &Matrix) -> Vec<String> {
    matrix
        .data_rows()
        .iter()
        .map(row_key)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
