use thiserror::Error;

/// Errors that can occur during matrix operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("Column index out of bounds: {index} (matrix has {count} columns)")]
    ColumnIndexOutOfBounds { index: usize, count: usize },

    #[error("Index out of bounds: row {row}, col {col} (matrix has {rows} rows, {cols} cols)")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, SheetError>;
