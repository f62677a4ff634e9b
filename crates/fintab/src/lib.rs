#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fintab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod pipeline;

// Re-export main types from sub-crates
pub use fintab_data as data;
pub use fintab_indicators as indicators;
pub use fintab_output as output;

pub use config::{ConfigError, ScrapeConfig};
pub use pipeline::{
    CompanyOutcome, PipelineError, Result, RunEvent, RunSummary, Scraper, SkippedCompany,
    process_report,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
