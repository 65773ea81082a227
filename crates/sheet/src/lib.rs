//! Matrix model and view operations for sheetview
//!
//! Holds the untyped tabular data delivered by a spreadsheet source, and the
//! pure operations that derive a displayed view from it: grouping-key
//! extraction, exact-match filtering and single-column sorting.
//!
//! # Examples
//!
//! ```
//! use sheetview_sheet::{apply_filter, apply_sort, FilterKey, Matrix, SortState};
//!
//! let baseline = Matrix::from_data(vec![
//!     vec!["Date", "Hours"],
//!     vec!["5/25/2024 9:00", "3"],
//!     vec!["5/26/2024 9:00", "5"],
//!     vec!["5/25/2024 10:00", "2"],
//! ]);
//!
//! let filtered = apply_filter(&baseline, &FilterKey::key("5/25/2024"));
//! assert_eq!(filtered.data_row_count(), 2);
//!
//! let sorted = apply_sort(&filtered, &baseline, &SortState::ascending(1)).unwrap();
//! assert_eq!(sorted.get(1, 1).unwrap().display(), "2");
//! ```

mod cell;
mod error;
mod filter;
mod group_key;
mod matrix;
mod sort;

/// Re-export cell value type.
pub use cell::Cell;
/// Re-export matrix error types.
pub use error::{Result, SheetError};
/// Re-export filter engine.
pub use filter::{apply_filter, filter_options, FilterKey};
/// Re-export grouping key extraction.
pub use group_key::{distinct_keys, extract_key, row_key};
/// Re-export matrix types.
pub use matrix::{Matrix, Row};
/// Re-export sort engine.
pub use sort::{apply_sort, compare_cells, locale_compare, SortDirection, SortState};
