//! # sheetview-core
//!
//! Sheet view engine.
//!
//! This crate provides:
//! - The view controller state machine (category, filter and sort selection)
//! - The async session that drives it against a spreadsheet source
//! - Configuration and error types

mod category;
/// Configuration types and loaders.
pub mod config;
mod controller;
/// Error types and result aliases.
pub mod error;
mod session;
mod source;

pub use category::Category;
pub use config::{ChartSettings, SourceConfig, ViewConfig, ViewSettings};
pub use controller::{FetchOutcome, FetchTicket, ViewController, ViewSnapshot};
pub use error::{ViewError, ViewResult};
pub use session::SheetSession;
pub use source::SheetSource;

/// Re-export the matrix model and view operations.
pub use sheetview_sheet::{Cell, FilterKey, Matrix, Row, SortDirection, SortState};
/// Re-export chart types.
pub use sheetview_viz::{ChartConfig, ChartEligibility, ChartKind, ChartSeries, ChartSpec};
