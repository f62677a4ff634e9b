//! Scrape configuration.

use fintab_data::{FetcherOptions, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Listing page of all traded shares.
pub const DEFAULT_DIRECTORY_URL: &str = "https://smart-lab.ru/q/shares/";

/// Yearly report page of a company; `{}` is replaced by the ticker.
pub const DEFAULT_REPORT_URL_TEMPLATE: &str = "https://smart-lab.ru/q/{}/f/y/";

/// Placeholder for the ticker in the report URL template.
pub const TICKER_PLACEHOLDER: &str = "{}";

/// Listing entries that are not companies (index, bonds, funds).
pub const DEFAULT_IGNORE_LIST: [&str; 7] = [
    "IMOEX",
    "RU000A0JTXM2",
    "RU000A0JUQZ6",
    "RU000A0JVEZ0",
    "RU000A0JVT35",
    "GEMA",
    "RUSI",
];

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path of the config file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`ScrapeConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Settings of a scrape run.
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// URL of the share listing page
    pub directory_url: String,
    /// URL template of a company's report page
    pub report_url_template: String,
    /// Listed tickers to leave out
    pub ignore_list: Vec<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Minimum pause between two requests in milliseconds
    pub min_interval_ms: u64,
    /// Number of report pages fetched at once
    pub concurrency: usize,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            report_url_template: DEFAULT_REPORT_URL_TEMPLATE.to_string(),
            ignore_list: DEFAULT_IGNORE_LIST.iter().map(ToString::to_string).collect(),
            timeout_secs: 5,
            min_interval_ms: 0,
            concurrency: 4,
            retry: RetryPolicy::default(),
        }
    }
}

impl ScrapeConfig {
    /// Parse a JSON config, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".to_string()));
        }
        if !self.report_url_template.contains(TICKER_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "report_url_template must contain {TICKER_PLACEHOLDER}"
            )));
        }
        Ok(())
    }

    /// Report page URL of a company.
    pub fn report_url(&self, ticker: &str) -> String {
        self.report_url_template.replacen(TICKER_PLACEHOLDER, ticker, 1)
    }

    /// Fetcher settings derived from this config.
    pub const fn fetcher_options(&self) -> FetcherOptions {
        FetcherOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            min_interval: Duration::from_millis(self.min_interval_ms),
            retry: self.retry,
        }
    }
}
