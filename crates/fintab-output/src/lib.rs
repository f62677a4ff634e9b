#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fintab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;

pub use export::{CSV_DELIMITER, ExportError, ExportFormat, Exporter, RunExport, records_to_csv};
pub use summary::{ColumnCoverage, CoverageSummary};
