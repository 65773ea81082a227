//! Shared helpers for sheetview-core integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use sheetview_core::{Category, Matrix, SheetSource, ViewError, ViewResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory source with optional failure switches.
#[derive(Default)]
pub struct MemorySource {
    pub order: Vec<Category>,
    pub sheets: HashMap<Category, Matrix>,
    pub fail_listing: bool,
    pub failing: Vec<Category>,
    pub fetches: AtomicUsize,
}

impl MemorySource {
    pub fn with_sheet(mut self, name: &str, matrix: Matrix) -> Self {
        self.order.push(Category::from(name));
        self.sheets.insert(Category::from(name), matrix);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetSource for MemorySource {
    async fn list_categories(&self) -> ViewResult<Vec<Category>> {
        if self.fail_listing {
            return Err(ViewError::Http("HTTP 503 - Service Unavailable".to_string()));
        }
        Ok(self.order.clone())
    }

    async fn fetch_matrix(&self, category: &Category) -> ViewResult<Matrix> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(category) {
            return Err(ViewError::Http("HTTP 500 - Internal Server Error".to_string()));
        }
        Ok(self.sheets.get(category).cloned().unwrap_or_default())
    }
}

pub fn hours() -> Matrix {
    Matrix::from_data(vec![
        vec!["Date", "Hours"],
        vec!["5/25/2024 9:00", "3"],
        vec!["5/26/2024 9:00", "5"],
        vec!["5/25/2024 10:00", "2"],
    ])
}

pub fn attendance() -> Matrix {
    Matrix::from_data(vec![
        vec!["Name", "Days Present"],
        vec!["Ann", "12"],
        vec!["Ben", "9"],
        vec!["Cy", ""],
    ])
}

pub fn source() -> MemorySource {
    MemorySource::default()
        .with_sheet("Hours", hours())
        .with_sheet("Attendance", attendance())
}
