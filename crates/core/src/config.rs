//! Configuration passed to the view controller at construction.
//!
//! A [`ViewConfig`] can be built in code, or loaded from a YAML/JSON settings
//! file through [`ViewSettings`]. Secrets are usually supplied from the
//! environment with [`ViewConfig::with_env_overrides`].

use crate::error::{ViewError, ViewResult};
use serde::{Deserialize, Serialize};
use sheetview_viz::{ChartConfig, ChartEligibility, DEFAULT_CHART_CATEGORY, DEFAULT_CHART_TITLE};
use std::fmt;
use std::path::Path;

/// Default base URL of the spreadsheet API.
pub const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the API key.
pub const ENV_API_KEY: &str = "SHEETVIEW_API_KEY";
/// Environment variable overriding the spreadsheet id.
pub const ENV_SPREADSHEET_ID: &str = "SHEETVIEW_SPREADSHEET_ID";
/// Environment variable overriding the API endpoint.
pub const ENV_ENDPOINT: &str = "SHEETVIEW_ENDPOINT";

/// Where the spreadsheet data comes from.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub endpoint: String,
    pub spreadsheet_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            spreadsheet_id: String::new(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            ..Self::default()
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("endpoint", &self.endpoint)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Complete configuration of a sheet view.
#[derive(Debug, Clone, Default)]
pub struct ViewConfig {
    pub source: SourceConfig,
    pub chart: ChartConfig,
}

impl ViewConfig {
    #[must_use]
    pub fn new(source: SourceConfig, chart: ChartConfig) -> Self {
        Self { source, chart }
    }

    /// Load settings from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> ViewResult<Self> {
        let settings: ViewSettings = serde_yaml::from_str(yaml)?;
        settings.into_config()
    }

    /// Load settings from a JSON document.
    pub fn from_json_str(json: &str) -> ViewResult<Self> {
        let settings: ViewSettings = serde_json::from_str(json)?;
        settings.into_config()
    }

    /// Load settings from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> ViewResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            other => Err(ViewError::config(format!(
                "unsupported settings file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> ViewResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn with_overrides<F>(mut self, lookup: F) -> ViewResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.source.api_key = Some(key);
        }
        if let Some(id) = lookup(ENV_SPREADSHEET_ID) {
            self.source.spreadsheet_id = id;
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.source.endpoint = endpoint;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the settings that can be checked without contacting the source.
    pub fn validate(&self) -> ViewResult<()> {
        if self.source.endpoint.trim().is_empty() {
            return Err(ViewError::config("source endpoint is empty"));
        }
        if self.source.spreadsheet_id.trim().is_empty() {
            return Err(ViewError::config("spreadsheet id is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(ViewError::config("timeout must be at least one second"));
        }
        Ok(())
    }
}

/// Serializable form of [`ViewConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewSettings {
    pub source: SourceConfig,
    pub chart: ChartSettings,
}

/// Serializable form of the chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSettings {
    pub label_column: usize,
    pub value_column: usize,
    /// Categories that get a chart. `["*"]` charts every category.
    pub categories: Vec<String>,
    pub title_fallback: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            label_column: 0,
            value_column: 1,
            categories: vec![DEFAULT_CHART_CATEGORY.to_string()],
            title_fallback: DEFAULT_CHART_TITLE.to_string(),
        }
    }
}

impl ChartSettings {
    fn into_chart_config(self) -> ChartConfig {
        let eligibility = if self.categories.iter().any(|c| c == "*") {
            ChartEligibility::Any
        } else {
            ChartEligibility::categories(self.categories)
        };
        ChartConfig {
            label_column: self.label_column,
            value_column: self.value_column,
            eligibility,
            title_fallback: self.title_fallback,
        }
    }
}

impl ViewSettings {
    /// Build and validate the runtime configuration.
    pub fn into_config(self) -> ViewResult<ViewConfig> {
        let config = ViewConfig::new(self.source, self.chart.into_chart_config());
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const YAML: &str = r"
source:
  spreadsheet_id: sheet-123
  api_key: secret
chart:
  value_column: 2
  categories: [Attendance, Overtime]
";

    #[test]
    fn test_from_yaml() {
        let config = ViewConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.source.spreadsheet_id, "sheet-123");
        assert_eq!(config.source.api_key.as_deref(), Some("secret"));
        assert_eq!(config.source.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.chart.label_column, 0);
        assert_eq!(config.chart.value_column, 2);
        assert!(config.chart.eligibility.is_eligible("Overtime"));
        assert!(!config.chart.eligibility.is_eligible("Tasks"));
    }

    #[test]
    fn test_from_json_wildcard() {
        let json = r#"{"source": {"spreadsheet_id": "x"}, "chart": {"categories": ["*"]}}"#;
        let config = ViewConfig::from_json_str(json).unwrap();
        assert!(config.chart.eligibility.is_eligible("anything"));
        assert_eq!(config.chart.title_fallback, DEFAULT_CHART_TITLE);
    }

    #[test]
    fn test_missing_spreadsheet_id() {
        let err = ViewConfig::from_yaml_str("chart:\n  value_column: 1\n").unwrap_err();
        assert!(matches!(err, ViewError::Config(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ViewConfig::from_yaml_str("source:\n  spreadsheet: x\n").unwrap_err();
        assert!(matches!(err, ViewError::Yaml(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_KEY, "from-env"),
            (ENV_SPREADSHEET_ID, "env-sheet"),
        ]
        .into_iter()
        .collect();
        let config = ViewConfig::default()
            .with_overrides(|k| env.get(k).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.source.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.source.spreadsheet_id, "env-sheet");
        assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut source = SourceConfig::new("id");
        source.api_key = Some("secret".to_string());
        let debug = format!("{source:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
