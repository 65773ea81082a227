use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// A single untyped cell as delivered by the spreadsheet source.
///
/// No column type is ever committed to: whether a cell is numeric is decided
/// per comparison by [`Cell::as_number`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Create a text cell.
    #[must_use]
    pub fn text<S: Into<String>>(s: S) -> Self {
        Cell::Text(s.into())
    }

    /// Check if the cell is absent or holds an empty string
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Try to read the cell as a finite decimal number.
    ///
    /// Text is trimmed before parsing. Empty cells, blank text and anything
    /// that parses to NaN or an infinity yield `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) | Cell::Empty => None,
            Cell::Text(s) => parse_decimal(s),
        }
    }

    /// The value as the table shows it.
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Convert a JSON value from the source API into a cell.
    ///
    /// Booleans are rendered the way spreadsheets show them.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Cell::Empty,
            JsonValue::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
            JsonValue::Number(n) => n.as_f64().map_or(Cell::Empty, Cell::Number),
            JsonValue::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    // f64's parser also accepts "inf" and "NaN"; neither counts as a number here
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, ""),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i32> for Cell {
    fn from(i: i32) -> Self {
        Cell::Number(f64::from(i))
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Cell::Empty,
        }
    }
}
