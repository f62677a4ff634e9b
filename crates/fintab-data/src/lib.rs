#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fintab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod directory;
pub mod error;
pub mod fetch;
pub mod html;

pub use directory::{CompanyListing, classify_ticker, parse_directory};
pub use error::{DataError, Result};
pub use fetch::{FetcherOptions, HtmlFetcher, RetryPolicy};
pub use html::{CompanyReport, parse_report};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
