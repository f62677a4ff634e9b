//! Value extraction from a single indicator row.
//!
//! Column positions are derived from the number of historical report columns
//! (`periods`) in the table header:
//!
//! | column               | contents                          |
//! |----------------------|-----------------------------------|
//! | `0`                  | row label                         |
//! | `1..=periods`        | historical yearly reports         |
//! | `periods`            | most recent completed year        |
//! | `periods + 2`        | trailing twelve months (LTM)      |
//!
//! These offsets mirror the upstream page layout. If that layout changes the
//! extracted values drift silently, so they are kept here as named constants.

use crate::layout::ReportLayout;
use crate::value::IndicatorValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of the first historical report column (column 0 is the row label).
pub const FIRST_PERIOD_COLUMN: usize = 1;

/// Distance from the last report column to the trailing-twelve-months column.
pub const LATEST_OFFSET: usize = 2;

/// Distance from the last report column to the last full year column.
pub const LAST_FULL_YEAR_OFFSET: usize = 0;

/// Which value to take from an indicator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Trailing-twelve-months figure
    Latest,
    /// Mean over all historical report columns (fresh reports only)
    Mean,
    /// Most recent completed year (fresh reports only)
    LastFullYear,
}

impl ValueKind {
    /// Whether this kind is only meaningful for a fresh report set.
    pub const fn requires_fresh_report(&self) -> bool {
        matches!(self, Self::Mean | Self::LastFullYear)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Latest => "latest",
            Self::Mean => "mean",
            Self::LastFullYear => "last full year",
        };
        f.write_str(name)
    }
}

impl ReportLayout {
    /// Column holding the trailing-twelve-months figure.
    pub const fn latest_column(&self) -> usize {
        self.periods() + LATEST_OFFSET
    }

    /// Column holding the most recent completed year.
    pub const fn last_full_year_column(&self) -> usize {
        self.periods() + LAST_FULL_YEAR_OFFSET
    }

    /// Extract a value of the given kind from a row.
    ///
    /// An absent row, a row too short for the requested column, or a
    /// non-numeric cell all yield [`IndicatorValue::Unavailable`].
    pub fn extract(&self, row: Option<&[String]>, kind: ValueKind) -> IndicatorValue {
        let Some(cells) = row else {
            return IndicatorValue::Unavailable;
        };
        if kind.requires_fresh_report() && !self.is_fresh() {
            return IndicatorValue::Unavailable;
        }

        match kind {
            ValueKind::Latest => IndicatorValue::parse_cell(cells.get(self.latest_column())),
            ValueKind::LastFullYear => {
                IndicatorValue::parse_cell(cells.get(self.last_full_year_column()))
            }
            ValueKind::Mean => {
                let columns = FIRST_PERIOD_COLUMN..=self.periods();
                IndicatorValue::mean(columns.map(|column| IndicatorValue::parse_cell(cells.get(column))))
            }
        }
    }
}
