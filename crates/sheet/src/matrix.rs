use crate::cell::Cell;
use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};

/// One row of cells.
pub type Row = Vec<Cell>;

/// A header row followed by zero or more data rows (row-major storage).
///
/// Every row has the same width. Ragged input is padded with [`Cell::Empty`]
/// up to the widest row when the matrix is built, so short rows read as
/// having absent trailing cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Row>", into = "Vec<Row>")]
pub struct Matrix {
    rows: Vec<Row>,
}

impl Matrix {
    /// Create a matrix with no rows at all, not even a header.
    #[must_use]
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a matrix from rows, padding ragged rows to a common width.
    ///
    /// The common width is that of the widest row, not of the header. A data
    /// row longer than the header widens the header with `Empty` cells, so no
    /// cell the source sent is dropped and every column index below
    /// [`width`](Self::width) is valid on every row, header included.
    #[must_use]
    pub fn new(mut rows: Vec<Row>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self { rows }
    }

    /// Create a matrix from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<Cell>>(data: Vec<Vec<T>>) -> Self {
        Self::new(
            data.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Build from a header and data rows that already share its width.
    pub(crate) fn from_parts(header: Row, data: Vec<Row>) -> Self {
        let mut rows = Vec::with_capacity(data.len() + 1);
        rows.push(header);
        rows.extend(data);
        Self { rows }
    }

    /// The header row, if the matrix has one.
    #[must_use]
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// All rows after the header.
    #[must_use]
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// All rows, header included.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows including the header
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of data rows
    #[must_use]
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Number of columns (the header width)
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// True when there is not even a header row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn has_data_rows(&self) -> bool {
        self.rows.len() > 1
    }

    /// Get a cell by row and column index (0-based, row 0 is the header)
    pub fn get(&self, row: usize, col: usize) -> Result<&Cell> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.width(),
            })
    }

    /// Fail with `ColumnIndexOutOfBounds` unless `col` addresses a header column.
    pub fn check_column(&self, col: usize) -> Result<()> {
        if col < self.width() {
            Ok(())
        } else {
            Err(SheetError::ColumnIndexOutOfBounds {
                index: col,
                count: self.width(),
            })
        }
    }

    /// Plain string grid, handy for display and assertions.
    #[must_use]
    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::display).collect())
            .collect()
    }

    pub(crate) fn split(&self) -> Option<(&Row, &[Row])> {
        self.rows.split_first()
    }
}

impl From<Vec<Row>> for Matrix {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl From<Matrix> for Vec<Row> {
    fn from(matrix: Matrix) -> Self {
        matrix.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::empty();
        assert!(m.is_empty());
        assert!(m.header().is_none());
        assert!(m.data_rows().is_empty());
        assert_eq!(m.width(), 0);
        assert_eq!(m.data_row_count(), 0);
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let m = Matrix::new(vec![
            vec![Cell::text("Date"), Cell::text("Hours")],
            vec![Cell::text("5/25/2024 9:00")],
        ]);
        assert_eq!(m.width(), 2);
        assert_eq!(m.get(1, 1).unwrap(), &Cell::Empty);
    }

    #[test]
    fn test_header_widened_by_long_row() {
        let m = Matrix::from_data(vec![vec!["A"], vec!["1", "2"]]);
        assert_eq!(m.width(), 2);
        assert_eq!(m.header().unwrap()[1], Cell::Empty);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::from_data(vec![vec!["A", "B"]]);
        assert!(matches!(
            m.get(3, 0),
            Err(SheetError::IndexOutOfBounds { row: 3, .. })
        ));
    }

    #[test]
    fn test_check_column() {
        let m = Matrix::from_data(vec![vec!["A", "B"]]);
        assert!(m.check_column(1).is_ok());
        assert_eq!(
            m.check_column(2),
            Err(SheetError::ColumnIndexOutOfBounds { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_serde_round_trip_normalises() {
        let m: Matrix = serde_json::from_str(r#"[["A","B"],["x"]]"#).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), &Cell::Empty);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"[["A","B"],["x",null]]"#);
    }
}
