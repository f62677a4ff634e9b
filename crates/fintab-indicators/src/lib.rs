#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fintab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod extract;
pub mod indicators;
pub mod layout;
pub mod record;
pub mod reference;
pub mod table;
pub mod value;

pub use error::{Result, StructureError};
pub use extract::{FIRST_PERIOD_COLUMN, LAST_FULL_YEAR_OFFSET, LATEST_OFFSET, ValueKind};
pub use indicators::{CompanyIndicators, IndicatorDef, fields};
pub use layout::{ReportLayout, count_report_periods, is_fresh};
pub use record::{
    IndicatorRecord, IndicatorSet, PREFERRED_SUFFIX, RECORD_FIELDS, StockClass, StockQuotes,
};
pub use reference::ReferenceYear;
pub use table::{FinancialTable, FinancialTableBuilder, TableRow};
pub use value::{IndicatorValue, UNAVAILABLE};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
