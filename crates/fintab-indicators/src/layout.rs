//! Column layout of a report table: how many reports it holds and whether
//! they are current.

use crate::error::Result;
use crate::reference::ReferenceYear;
use crate::table::FinancialTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether a header cell is a period label such as `2021`.
fn is_period_label(cell: &str) -> bool {
    let cell = cell.trim();
    !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit())
}

/// Count the header cells that are numeric period labels.
///
/// Every cell is inspected; labels like `LTM` or blanks neither count nor stop
/// the scan.
pub fn count_report_periods(header: &[String]) -> usize {
    header.iter().filter(|cell| is_period_label(cell)).count()
}

/// Decide whether the report set reaches the reference year.
///
/// The cell at index `periods` is read as the latest labeled year. A missing
/// or non-numeric cell classifies the report set as stale.
pub fn is_fresh(header: &[String], periods: usize, reference: ReferenceYear) -> bool {
    header
        .get(periods)
        .and_then(|cell| cell.trim().parse::<i32>().ok())
        .is_some_and(|year| reference.year() <= year)
}

/// Snapshot of a table's report columns, computed once per table.
///
/// Every extraction against the same table must use the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    periods: usize,
    fresh: bool,
}

impl ReportLayout {
    /// Build a layout from its parts.
    pub const fn new(periods: usize, fresh: bool) -> Self {
        Self { periods, fresh }
    }

    /// Read the layout off the table header.
    ///
    /// Fails with [`StructureError::MissingHeader`](crate::StructureError::MissingHeader)
    /// when the table has no header row.
    pub fn from_table(table: &FinancialTable, reference: ReferenceYear) -> Result<Self> {
        let header = table.header()?;
        let periods = count_report_periods(header);
        let fresh = is_fresh(header, periods, reference);
        debug!(periods, fresh, reference = reference.year(), "report layout");
        Ok(Self { periods, fresh })
    }

    /// Number of historical report columns.
    pub const fn periods(&self) -> usize {
        self.periods
    }

    /// Whether the latest report reaches the reference year.
    pub const fn is_fresh(&self) -> bool {
        self.fresh
    }
}
