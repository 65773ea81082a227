//! Exact-match filtering on the grouping key.
//!
//! Filtering is always computed from the baseline matrix, never from a sorted
//! view, so applying a filter discards the effect of any earlier sort.

use crate::group_key::{distinct_keys, row_key};
use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The active filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    /// Show every data row.
    #[default]
    All,
    /// Show only rows whose grouping key equals this value.
    Key(String),
}

impl FilterKey {
    #[must_use]
    pub fn key<S: Into<String>>(key: S) -> Self {
        FilterKey::Key(key.into())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, FilterKey::All)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::All => write!(f, "All"),
            FilterKey::Key(k) => write!(f, "{k}"),
        }
    }
}

/// Narrow `baseline` to the header plus the data rows matching `key`.
///
/// Matching rows keep their original relative order.
#[must_use]
pub fn apply_filter(baseline: &Matrix, key: &FilterKey) -> Matrix {
    let FilterKey::Key(wanted) = key else {
        return baseline.clone();
    };
    let Some((header, data)) = baseline.split() else {
        return Matrix::empty();
    };
    let kept = data
        .iter()
        .filter(|row| row_key(row) == *wanted)
        .cloned()
        .collect();
    Matrix::from_parts(header.clone(), kept)
}

/// Filter choices for a matrix: `All` followed by each distinct grouping key.
#[must_use]
pub fn filter_options(matrix: &Matrix) -> Vec<FilterKey> {
    std::iter::once(FilterKey::All)
        .chain(distinct_keys(matrix).into_iter().map(FilterKey::Key))
        .collect()
}
