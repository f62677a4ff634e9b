//! Reference fiscal year used to judge report freshness.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// First month (1-based) in which the previous fiscal year counts as final.
///
/// Yearly reports are published with a lag, so before July the year before
/// last is the latest year a complete report can be expected for.
pub const FINAL_REPORT_MONTH: u32 = 7;

/// The fiscal year a report set must reach to count as fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReferenceYear(i32);

impl ReferenceYear {
    /// Use an explicit year.
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    /// Derive the reference year for a calendar date.
    ///
    /// From July on this is the previous year, before July the year before
    /// that.
    pub fn for_date(date: NaiveDate) -> Self {
        if date.month() >= FINAL_REPORT_MONTH {
            Self(date.year() - 1)
        } else {
            Self(date.year() - 2)
        }
    }

    /// Derive the reference year for today's local date.
    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// The year as a number.
    pub const fn year(self) -> i32 {
        self.0
    }
}

impl From<i32> for ReferenceYear {
    fn from(year: i32) -> Self {
        Self(year)
    }
}

impl fmt::Display for ReferenceYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
