use crate::category::Category;
use crate::error::ViewResult;
use async_trait::async_trait;
use sheetview_sheet::Matrix;

/// External collaborator that knows the categories and delivers their data.
///
/// Implementations report failures as errors; the session turns them into
/// diagnostics and leaves the view state untouched.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// List the selectable categories in display order.
    async fn list_categories(&self) -> ViewResult<Vec<Category>>;

    /// Fetch the full matrix of one category. No data is an empty matrix.
    async fn fetch_matrix(&self, category: &Category) -> ViewResult<Matrix>;
}
