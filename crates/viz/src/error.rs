//! Error types for chart projection.

use thiserror::Error;

/// Result type for chart operations.
pub type VizResult<T> = Result<T, VizError>;

/// Errors that can occur while projecting or serializing charts.
#[derive(Debug, Error)]
pub enum VizError {
    /// A configured chart column is outside the header.
    #[error("Chart {role} column {index} out of range (header has {count} columns)")]
    ColumnOutOfRange {
        role: &'static str,
        index: usize,
        count: usize,
    },

    /// Chart specification could not be serialized.
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
