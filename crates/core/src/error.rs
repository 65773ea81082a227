//! Error types for sheetview.

use sheetview_sheet::SheetError;
use sheetview_viz::VizError;
use thiserror::Error;

/// Result type for sheetview operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors that can occur in sheetview.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Matrix operation failed, e.g. a sort column outside the header.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// Chart projection failed.
    #[error(transparent)]
    Viz(#[from] VizError),

    /// Selected category is not one the source offers.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ViewError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
