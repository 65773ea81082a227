//! Derive a labeled numeric series from the displayed matrix.

use crate::error::{VizError, VizResult};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use sheetview_sheet::{Cell, Matrix};
use std::fmt;
use std::sync::Arc;

/// Category that gets a chart when nothing else is configured.
pub const DEFAULT_CHART_CATEGORY: &str = "Attendance";
/// Series title used when the header has no label for the value column.
pub const DEFAULT_CHART_TITLE: &str = "Attendance Chart";

/// Decides which categories get a chart.
#[derive(Clone)]
pub enum ChartEligibility {
    /// Every category is charted.
    Any,
    /// Only the named categories are charted.
    Categories(IndexSet<String>),
    /// Arbitrary predicate over the category name.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl ChartEligibility {
    pub fn categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ChartEligibility::Categories(names.into_iter().map(Into::into).collect())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        ChartEligibility::Predicate(Arc::new(f))
    }

    #[must_use]
    pub fn is_eligible(&self, category: &str) -> bool {
        match self {
            ChartEligibility::Any => true,
            ChartEligibility::Categories(names) => names.contains(category),
            ChartEligibility::Predicate(f) => f(category),
        }
    }
}

impl Default for ChartEligibility {
    fn default() -> Self {
        Self::categories([DEFAULT_CHART_CATEGORY])
    }
}

impl fmt::Debug for ChartEligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartEligibility::Any => write!(f, "Any"),
            ChartEligibility::Categories(names) => {
                f.debug_tuple("Categories").field(names).finish()
            }
            ChartEligibility::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// Which columns feed the chart, and for which categories.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub label_column: usize,
    pub value_column: usize,
    pub eligibility: ChartEligibility,
    pub title_fallback: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            label_column: 0,
            value_column: 1,
            eligibility: ChartEligibility::default(),
            title_fallback: DEFAULT_CHART_TITLE.to_string(),
        }
    }
}

/// Parallel labels and values for one chart dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Project the data rows of `working` into a chart series.
///
/// The series is empty unless `category` is eligible and the matrix has at
/// least one data row. Missing labels become `""`; missing or non-numeric
/// values become `0`.
///
/// # Errors
///
/// Returns `ColumnOutOfRange` when a configured column is outside the header
/// of a view that would be charted.
pub fn project(
    working: &Matrix,
    category: Option<&str>,
    config: &ChartConfig,
) -> VizResult<ChartSeries> {
    let eligible = category.is_some_and(|c| config.eligibility.is_eligible(c));
    let Some(header) = working.header().filter(|_| eligible && working.has_data_rows()) else {
        return Ok(ChartSeries::default());
    };
    for (role, index) in [("label", config.label_column), ("value", config.value_column)] {
        if index >= header.len() {
            return Err(VizError::ColumnOutOfRange {
                role,
                index,
                count: header.len(),
            });
        }
    }

    let title = match &header[config.value_column] {
        cell if cell.is_empty() => config.title_fallback.clone(),
        cell => cell.display(),
    };
    let (labels, values): (Vec<String>, Vec<f64>) = working
        .data_rows()
        .iter()
        .map(|row| {
            let label = row.get(config.label_column).map(Cell::display).unwrap_or_default();
            let value = row
                .get(config.value_column)
                .and_then(Cell::as_number)
                .unwrap_or(0.0);
            (label, value)
        })
        .unzip();

    Ok(ChartSeries {
        title,
        labels,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendance() -> Matrix {
        Matrix::from_data(vec![
            vec!["Name", "Days"],
            vec!["Ann", "12"],
            vec!["Ben", "n/a"],
            vec!["", "4.5"],
        ])
    }

    #[test]
    fn test_project_eligible() {
        let config = ChartConfig::default();
        let series = project(&attendance(), Some("Attendance"), &config).unwrap();
        assert_eq!(series.title, "Days");
        assert_eq!(series.labels, vec!["Ann", "Ben", ""]);
        assert_eq!(series.values, vec![12.0, 0.0, 4.5]);
    }

    #[test]
    fn test_project_not_eligible() {
        let series = project(&attendance(), Some("Tasks"), &ChartConfig::default()).unwrap();
        assert_eq!(series, ChartSeries::default());
        let series = project(&attendance(), None, &ChartConfig::default()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_project_header_only() {
        let m = Matrix::from_data(vec![vec!["A", "B"]]);
        let series = project(&m, Some("Attendance"), &ChartConfig::default()).unwrap();
        assert!(series.is_empty());
        assert!(series.values.is_empty());
    }

    #[test]
    fn test_title_fallback() {
        let m = Matrix::from_data(vec![vec!["Name", ""], vec!["Ann", "1"]]);
        let series = project(&m, Some("Attendance"), &ChartConfig::default()).unwrap();
        assert_eq!(series.title, DEFAULT_CHART_TITLE);
    }

    #[test]
    fn test_out_of_range_column() {
        let config = ChartConfig {
            value_column: 7,
            ..ChartConfig::default()
        };
        let err = project(&attendance(), Some("Attendance"), &config).unwrap_err();
        assert!(matches!(
            err,
            VizError::ColumnOutOfRange {
                role: "value",
                index: 7,
                count: 2
            }
        ));
    }

    #[test]
    fn test_out_of_range_ignored_when_not_charted() {
        let config = ChartConfig {
            label_column: 9,
            ..ChartConfig::default()
        };
        assert!(project(&attendance(), Some("Tasks"), &config)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_predicate_eligibility() {
        let config = ChartConfig {
            eligibility: ChartEligibility::predicate(|c| c.starts_with("Week")),
            ..ChartConfig::default()
        };
        assert_eq!(
            project(&attendance(), Some("Week 1"), &config).unwrap().len(),
            3
        );
        assert!(ChartEligibility::Any.is_eligible("anything"));
    }
}
