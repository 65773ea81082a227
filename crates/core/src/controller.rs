//! The view state machine.
//!
//! Three independent pieces of state drive the display: the active category,
//! the filter selection and the sort selection. Every transition runs to
//! completion synchronously. The only asynchronous step, fetching a category's
//! data, is split into [`ViewController::select_category`], which hands out a
//! [`FetchTicket`], and [`ViewController::complete_fetch`], which applies the
//! result only if the ticket is still the latest one.

use crate::category::Category;
use crate::config::ViewConfig;
use crate::error::{ViewError, ViewResult};
use serde::{Deserialize, Serialize};
use sheetview_sheet::{apply_filter, apply_sort, filter_options, FilterKey, Matrix, SortState};
use sheetview_viz::{project, ChartSeries};
use std::fmt;
use tracing::{debug, warn};

/// Receipt for an outstanding fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub category: Category,
    generation: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a delivered fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchOutcome {
    /// The result became the new baseline.
    Applied,
    /// A newer selection superseded the request; the result was dropped.
    Stale,
    /// The source failed; the previous data is still shown.
    Failed,
}

/// Everything the rendering layer needs to draw the current view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub categories: Vec<Category>,
    pub active_category: Option<Category>,
    pub working: Matrix,
    pub filter: FilterKey,
    pub filter_options: Vec<FilterKey>,
    pub sort: SortState,
    pub chart: ChartSeries,
    /// Why `chart` is empty when the chart columns do not fit the view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_error: Option<String>,
}

/// Holds the baseline and working matrices and applies user commands to them.
pub struct ViewController {
    config: ViewConfig,
    categories: Vec<Category>,
    active: Option<Category>,
    baseline: Matrix,
    working: Matrix,
    filter: FilterKey,
    sort: SortState,
    generation: u64,
}

impl ViewController {
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            categories: Vec::new(),
            active: None,
            baseline: Matrix::empty(),
            working: Matrix::empty(),
            filter: FilterKey::All,
            sort: SortState::unordered(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Replace the list of selectable categories.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn active_category(&self) -> Option<&Category> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn baseline(&self) -> &Matrix {
        &self.baseline
    }

    #[must_use]
    pub fn working(&self) -> &Matrix {
        &self.working
    }

    #[must_use]
    pub fn filter(&self) -> &FilterKey {
        &self.filter
    }

    #[must_use]
    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Make `category` active and issue a ticket for fetching its data.
    ///
    /// The baseline is left alone until the fetch completes. When a category
    /// list is known, `category` must be on it.
    pub fn select_category(&mut self, category: impl Into<Category>) -> ViewResult<FetchTicket> {
        let category = category.into();
        if !self.categories.is_empty() && !self.categories.contains(&category) {
            return Err(ViewError::UnknownCategory(category.to_string()));
        }
        self.generation += 1;
        self.active = Some(category.clone());
        debug!(%category, generation = self.generation, "category selected");
        Ok(FetchTicket {
            category,
            generation: self.generation,
        })
    }

    /// Deliver fetched data for `ticket`.
    ///
    /// Applies it as the new baseline, resetting filter and sort, unless a
    /// later selection has superseded the ticket.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, matrix: Matrix) -> FetchOutcome {
        if !self.is_current(ticket) {
            debug!(
                category = %ticket.category,
                generation = ticket.generation,
                "discarding stale fetch result"
            );
            return FetchOutcome::Stale;
        }
        debug!(
            category = %ticket.category,
            rows = matrix.data_row_count(),
            "baseline replaced"
        );
        self.working = matrix.clone();
        self.baseline = matrix;
        self.filter = FilterKey::All;
        self.sort = SortState::unordered();
        FetchOutcome::Applied
    }

    /// Record that the fetch for `ticket` failed. State is left untouched.
    pub fn fail_fetch(&self, ticket: &FetchTicket, error: &ViewError) -> FetchOutcome {
        if !self.is_current(ticket) {
            debug!(category = %ticket.category, %error, "ignoring failure of stale fetch");
            return FetchOutcome::Stale;
        }
        warn!(category = %ticket.category, %error, "failed to fetch sheet data");
        FetchOutcome::Failed
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && self.active.as_ref() == Some(&ticket.category)
    }

    /// Select a filter. The working view is recomputed from the baseline, so
    /// any earlier sort is discarded; the stored sort state is kept.
    pub fn set_filter(&mut self, key: FilterKey) {
        debug!(filter = %key, "filter selected");
        self.working = apply_filter(&self.baseline, &key);
        self.filter = key;
    }

    /// Sort the working view. `Unordered` resets the view to the baseline,
    /// dropping any active filter from the view.
    ///
    /// On error nothing changes.
    pub fn set_sort(&mut self, state: SortState) -> ViewResult<()> {
        let working = apply_sort(&self.working, &self.baseline, &state)?;
        debug!(column = state.column, direction = ?state.direction, "sort selected");
        self.working = working;
        self.sort = state;
        Ok(())
    }

    /// Advance the sort control of `column` and apply the resulting state.
    pub fn toggle_sort(&mut self, column: usize) -> ViewResult<SortState> {
        let next = self.sort.toggle(column);
        self.set_sort(next)?;
        Ok(next)
    }

    /// Filter choices for the current baseline, `All` first.
    #[must_use]
    pub fn filter_options(&self) -> Vec<FilterKey> {
        filter_options(&self.baseline)
    }

    /// Chart series derived from the working view and active category.
    pub fn chart_series(&self) -> ViewResult<ChartSeries> {
        Ok(project(
            &self.working,
            self.active.as_ref().map(Category::as_str),
            &self.config.chart,
        )?)
    }

    /// Current state for the rendering layer.
    ///
    /// A chart that cannot be projected is reported in `chart_error` with an
    /// empty series; the table state is still complete.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        let (chart, chart_error) = match self.chart_series() {
            Ok(chart) => (chart, None),
            Err(error) => {
                warn!(%error, "chart not projected");
                (ChartSeries::default(), Some(error.to_string()))
            }
        };
        ViewSnapshot {
            categories: self.categories.clone(),
            active_category: self.active.clone(),
            working: self.working.clone(),
            filter: self.filter.clone(),
            filter_options: self.filter_options(),
            sort: self.sort,
            chart,
            chart_error,
        }
    }
}

impl fmt::Debug for ViewController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewController")
            .field("active", &self.active)
            .field("rows", &self.working.row_count())
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Matrix {
        Matrix::from_data(vec![
            vec!["Date", "Hours"],
            vec!["5/25/2024 9:00", "3"],
            vec!["5/26/2024 9:00", "5"],
            vec!["5/25/2024 10:00", "2"],
        ])
    }

    fn loaded(category: &str) -> ViewController {
        let mut view = ViewController::new(ViewConfig::default());
        let ticket = view.select_category(category).unwrap();
        assert_eq!(view.complete_fetch(&ticket, baseline()), FetchOutcome::Applied);
        view
    }

    #[test]
    fn test_initial_state() {
        let view = ViewController::new(ViewConfig::default());
        assert!(view.active_category().is_none());
        assert!(view.working().is_empty());
        assert!(view.baseline().is_empty());
        assert_eq!(view.filter(), &FilterKey::All);
        assert_eq!(view.sort(), SortState::unordered());
        assert!(view.chart_series().unwrap().is_empty());
    }

    #[test]
    fn test_fetch_resets_filter_and_sort() {
        let mut view = loaded("Hours");
        view.set_filter(FilterKey::key("5/25/2024"));
        view.set_sort(SortState::ascending(1)).unwrap();

        let ticket = view.select_category("Hours").unwrap();
        view.complete_fetch(&ticket, baseline());
        assert_eq!(view.filter(), &FilterKey::All);
        assert_eq!(view.sort(), SortState::unordered());
        assert_eq!(view.working(), &baseline());
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut view = ViewController::new(ViewConfig::default());
        let first = view.select_category("A").unwrap();
        let second = view.select_category("B").unwrap();

        let late = Matrix::from_data(vec![vec!["late"]]);
        assert_eq!(view.complete_fetch(&first, late), FetchOutcome::Stale);
        assert!(view.working().is_empty());

        assert_eq!(view.complete_fetch(&second, baseline()), FetchOutcome::Applied);
        assert_eq!(view.active_category(), Some(&Category::from("B")));
    }

    #[test]
    fn test_reselecting_same_category_supersedes_older_ticket() {
        let mut view = ViewController::new(ViewConfig::default());
        let old = view.select_category("A").unwrap();
        let _b = view.select_category("B").unwrap();
        let new = view.select_category("A").unwrap();
        assert_eq!(view.complete_fetch(&old, baseline()), FetchOutcome::Stale);
        assert_eq!(view.complete_fetch(&new, baseline()), FetchOutcome::Applied);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_data() {
        let mut view = loaded("Hours");
        let ticket = view.select_category("Other").unwrap();
        let outcome = view.fail_fetch(&ticket, &ViewError::Http("HTTP 500".to_string()));
        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(view.baseline(), &baseline());
        assert_eq!(view.active_category(), Some(&Category::from("Other")));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut view = ViewController::new(ViewConfig::default());
        view.set_categories(vec!["Attendance".into(), "Tasks".into()]);
        assert!(matches!(
            view.select_category("Nope"),
            Err(ViewError::UnknownCategory(name)) if name == "Nope"
        ));
        assert!(view.active_category().is_none());
        assert!(view.select_category("Tasks").is_ok());
    }

    #[test]
    fn test_bad_sort_leaves_state() {
        let mut view = loaded("Hours");
        view.set_sort(SortState::ascending(1)).unwrap();
        let before = view.working().clone();
        assert!(view.set_sort(SortState::descending(9)).is_err());
        assert_eq!(view.sort(), SortState::ascending(1));
        assert_eq!(view.working(), &before);
    }

    #[test]
    fn test_toggle_sort() {
        let mut view = loaded("Hours");
        assert_eq!(view.toggle_sort(1).unwrap(), SortState::ascending(1));
        assert_eq!(view.toggle_sort(1).unwrap(), SortState::descending(1));
        let hours: Vec<String> = view
            .working()
            .data_rows()
            .iter()
            .map(|r| r[1].display())
            .collect();
        assert_eq!(hours, vec!["5", "3", "2"]);
    }

    #[test]
    fn test_filter_options_follow_baseline() {
        let mut view = loaded("Hours");
        view.set_filter(FilterKey::key("5/26/2024"));
        assert_eq!(
            view.filter_options(),
            vec![
                FilterKey::All,
                FilterKey::key("5/25/2024"),
                FilterKey::key("5/26/2024"),
            ]
        );
    }

    #[test]
    fn test_snapshot() {
        let view = loaded("Attendance");
        let snapshot = view.snapshot();
        assert_eq!(snapshot.active_category, Some(Category::from("Attendance")));
        assert_eq!(snapshot.chart.title, "Hours");
        assert_eq!(snapshot.chart.values, vec![3.0, 5.0, 2.0]);
        assert_eq!(snapshot.filter_options.len(), 3);
        assert!(snapshot.chart_error.is_none());
    }

    #[test]
    fn test_snapshot_reports_chart_error() {
        let mut view = ViewController::new(ViewConfig::default());
        let ticket = view.select_category("Attendance").unwrap();
        let narrow = Matrix::from_data(vec![vec!["Name"], vec!["Ann"], vec!["Ben"]]);
        view.complete_fetch(&ticket, narrow);

        assert!(view.chart_series().is_err());
        let snapshot = view.snapshot();
        assert_eq!(snapshot.working.data_row_count(), 2);
        assert!(snapshot.chart.is_empty());
        assert!(snapshot.chart_error.unwrap().contains("out of range"));
    }
}
