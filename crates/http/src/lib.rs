//! # sheetview-http
//!
//! HTTP source for sheetview.
//!
//! This crate fetches category (sheet tab) names and cell values from a
//! spreadsheet REST API shaped like Google Sheets v4:
//! - `GET {endpoint}/v4/spreadsheets/{id}?fields=sheets.properties.title`
//! - `GET {endpoint}/v4/spreadsheets/{id}/values/{range}`

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use sheetview_core::{Cell, Category, Matrix, SheetSource, SourceConfig, ViewError, ViewResult};
use std::time::Duration;
use tracing::debug;

/// Spreadsheet API client.
pub struct SheetsClient {
    client: Client,
    base: Url,
    spreadsheet_id: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

impl SheetsClient {
    /// Constructs a client for the spreadsheet described by `config`.
    ///
    /// The underlying client uses `config.timeout_secs` as its request
    /// timeout and is configured to bypass system proxy lookup.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Config` if the endpoint is not a valid base URL,
    /// or `ViewError::Http` if building the HTTP client fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetview_core::SourceConfig;
    /// use sheetview_http::SheetsClient;
    ///
    /// let client = SheetsClient::new(&SourceConfig::new("spreadsheet-id"))
    ///     .expect("failed to create SheetsClient");
    /// ```
    pub fn new(config: &SourceConfig) -> ViewResult<Self> {
        let base = Url::parse(&config.endpoint).map_err(|e| {
            ViewError::config(format!("invalid endpoint '{}': {e}", config.endpoint))
        })?;
        if base.cannot_be_a_base() {
            return Err(ViewError::config(format!(
                "endpoint '{}' cannot be used as a base URL",
                config.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(|e| ViewError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base,
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// URL of the spreadsheet metadata, restricted to the sheet titles.
    pub fn categories_url(&self) -> Url {
        let mut url = self.spreadsheet_url(&[]);
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        self.with_key(url)
    }

    /// URL of the values of one category; the whole sheet is the range.
    pub fn values_url(&self, category: &Category) -> Url {
        let url = self.spreadsheet_url(&["values", category.as_str()]);
        self.with_key(url)
    }

    fn spreadsheet_url(&self, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
                .extend(tail);
        }
        url
    }

    fn with_key(&self, mut url: Url) -> Url {
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ViewResult<T> {
        debug!(path = url.path(), "requesting");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ViewError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ViewError::Http(format!(
                "HTTP {} - {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ViewError::Http(format!("Failed to parse JSON: {e}")))
    }
}

/// Build a matrix from the API's `values` grid.
#[must_use]
pub fn matrix_from_values(values: &[Vec<JsonValue>]) -> Matrix {
    Matrix::new(
        values
            .iter()
            .map(|row| row.iter().map(Cell::from_json).collect())
            .collect(),
    )
}

#[async_trait]
impl SheetSource for SheetsClient {
    async fn list_categories(&self) -> ViewResult<Vec<Category>> {
        let response: SpreadsheetResponse = self.get_json(self.categories_url()).await?;
        Ok(response
            .sheets
            .into_iter()
            .map(|sheet| Category::from(sheet.properties.title))
            .collect())
    }

    async fn fetch_matrix(&self, category: &Category) -> ViewResult<Matrix> {
        let range: ValueRange = self.get_json(self.values_url(category)).await?;
        let matrix = matrix_from_values(&range.values);
        debug!(%category, rows = matrix.row_count(), "sheet values received");
        Ok(matrix)
    }
}
