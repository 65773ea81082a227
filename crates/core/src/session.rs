use crate::category::Category;
use crate::config::ViewConfig;
use crate::controller::{FetchOutcome, ViewController, ViewSnapshot};
use crate::error::ViewResult;
use crate::source::SheetSource;
use sheetview_sheet::{FilterKey, SortState};
use tokio::sync::watch;
use tracing::{info, warn};

/// Drives a [`ViewController`] against a [`SheetSource`] and publishes a
/// [`ViewSnapshot`] after every transition.
pub struct SheetSession<S> {
    view: ViewController,
    source: S,
    updates: watch::Sender<ViewSnapshot>,
}

impl<S: SheetSource> SheetSession<S> {
    pub fn new(config: ViewConfig, source: S) -> Self {
        let (updates, _) = watch::channel(ViewSnapshot::default());
        Self {
            view: ViewController::new(config),
            source,
            updates,
        }
    }

    /// Receive a fresh snapshot whenever the view changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.updates.subscribe()
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// List the source's categories and select the first one.
    ///
    /// A failing source is logged and treated as offering nothing.
    pub async fn load_categories(&mut self) -> ViewResult<Vec<Category>> {
        let categories = match self.source.list_categories().await {
            Ok(categories) => categories,
            Err(error) => {
                warn!(%error, "failed to list categories");
                Vec::new()
            }
        };
        info!(count = categories.len(), "categories loaded");
        self.view.set_categories(categories.clone());
        match categories.first() {
            Some(first) => {
                self.select_category(first.clone()).await?;
            }
            None => self.publish(),
        }
        Ok(categories)
    }

    /// Make `category` active and load its data.
    pub async fn select_category(
        &mut self,
        category: impl Into<Category>,
    ) -> ViewResult<FetchOutcome> {
        let ticket = self.view.select_category(category)?;
        self.publish();
        let outcome = match self.source.fetch_matrix(&ticket.category).await {
            Ok(matrix) => self.view.complete_fetch(&ticket, matrix),
            Err(error) => self.view.fail_fetch(&ticket, &error),
        };
        self.publish();
        Ok(outcome)
    }

    pub fn set_filter(&mut self, key: FilterKey) {
        self.view.set_filter(key);
        self.publish();
    }

    pub fn set_sort(&mut self, state: SortState) -> ViewResult<()> {
        self.view.set_sort(state)?;
        self.publish();
        Ok(())
    }

    pub fn toggle_sort(&mut self, column: usize) -> ViewResult<SortState> {
        let state = self.view.toggle_sort(column)?;
        self.publish();
        Ok(state)
    }

    fn publish(&self) {
        self.updates.send_replace(self.view.snapshot());
    }
}
