//! Single-column sorting of a matrix view.
//!
//! Sorting works on whatever view is currently displayed, which may already
//! be filtered. The one exception is [`SortDirection::Unordered`], which resets
//! the view to the baseline and so also drops any active filter.

use crate::cell::Cell;
use crate::error::Result;
use crate::matrix::{Matrix, Row};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// No sort applied; the view is reset to the baseline.
    #[default]
    Unordered,
    Ascending,
    Descending,
}

impl SortDirection {
    /// The direction a sort toggle moves to next.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            SortDirection::Unordered | SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }
}

/// Which column is sorted, and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub fn new(column: usize, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    #[must_use]
    pub fn ascending(column: usize) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    #[must_use]
    pub fn descending(column: usize) -> Self {
        Self::new(column, SortDirection::Descending)
    }

    /// The reset state.
    #[must_use]
    pub fn unordered() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_unordered(&self) -> bool {
        self.direction == SortDirection::Unordered
    }

    /// State after the user clicks the sort control of `column`.
    ///
    /// Clicking the active column advances its direction; clicking another
    /// column starts over at ascending.
    #[must_use]
    pub fn toggle(&self, column: usize) -> Self {
        if column == self.column && !self.is_unordered() {
            Self::new(column, self.direction.next())
        } else {
            Self::ascending(column)
        }
    }
}

/// Apply `state` to the `current` view.
///
/// `Unordered` returns a copy of `baseline`. Otherwise the data rows of
/// `current` are reordered by `state.column`; the header stays in place.
///
/// # Errors
///
/// Returns `ColumnIndexOutOfBounds` when the column is outside the header of
/// a non-empty view.
pub fn apply_sort(current: &Matrix, baseline: &Matrix, state: &SortState) -> Result<Matrix> {
    if state.is_unordered() {
        return Ok(baseline.clone());
    }
    let Some((header, data)) = current.split() else {
        return Ok(Matrix::empty());
    };
    current.check_column(state.column)?;

    let column = state.column;
    let descending = state.direction == SortDirection::Descending;
    let rows = merge_sort_by(data.to_vec(), |a, b| {
        let ord = compare_cells(cell_at(a, column), cell_at(b, column));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    Ok(Matrix::from_parts(header.clone(), rows))
}

static EMPTY: Cell = Cell::Empty;

fn cell_at(row: &Row, column: usize) -> &Cell {
    row.get(column).unwrap_or(&EMPTY)
}

/// Compare two cells: numerically when both parse as numbers, otherwise as
/// text under [`locale_compare`].
#[must_use]
pub fn compare_cells(a: &Cell, b: &Cell) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => locale_compare(&a.display(), &b.display()),
    }
}

/// Root-collation style string ordering.
///
/// Case-folded text decides first, then lowercase sorts before uppercase,
/// then raw code points break any remaining tie.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| {
            let case = |s: &str| s.chars().map(char::is_uppercase).collect::<Vec<_>>();
            case(a).cmp(&case(b))
        })
        .then_with(|| a.cmp(b))
}

// Mixed numeric/text columns can make the cell comparator intransitive, and
// `slice::sort_by` may panic on such comparators. Stable natural merge sort:
// input is split into non-descending runs, so rows already in order under the
// comparator are returned as they are. Merging keeps every adjacent pair in
// order, which makes re-sorting a sorted view a no-op.
fn merge_sort_by<T, F>(items: Vec<T>, mut cmp: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut runs: Vec<Vec<T>> = Vec::new();
    for item in items {
        match runs.last_mut() {
            Some(run) if run.last().is_some_and(|last| cmp(last, &item) != Ordering::Greater) => {
                run.push(item);
            }
            _ => runs.push(vec![item]),
        }
    }
    while runs.len() > 1 {
        let mut merged = Vec::with_capacity(runs.len().div_ceil(2));
        let mut iter = runs.into_iter();
        while let Some(left) = iter.next() {
            match iter.next() {
                Some(right) => merged.push(merge(left, right, &mut cmp)),
                None => merged.push(left),
            }
        }
        runs = merged;
    }
    runs.pop().unwrap_or_default()
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(l, r) == Ordering::Greater,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }
    out
}
