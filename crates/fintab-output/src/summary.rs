//! Coverage summary of an export.
//!
//! Counts how many records carry an available value for each indicator
//! column, which makes silent layout drift on the source pages visible.

use fintab_indicators::{IndicatorRecord, RECORD_FIELDS, StockClass, UNAVAILABLE};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Index of the first numeric column in [`RECORD_FIELDS`].
const FIRST_VALUE_COLUMN: usize = 2;

/// Availability count of one indicator column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCoverage {
    /// Column name as written in the export header.
    pub column: &'static str,

    /// Records with an available value.
    pub available: usize,
}

impl ColumnCoverage {
    /// Share of `total` records with an available value, in percent.
    pub const fn percent(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.available as f64 / total as f64 * 100.0
        }
    }
}

/// Summary of a set of exported records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageSummary {
    /// Number of records.
    pub records: usize,

    /// Number of distinct companies.
    pub companies: usize,

    /// Number of preferred share records.
    pub preferred: usize,

    /// Per indicator column availability, in export column order.
    pub columns: Vec<ColumnCoverage>,
}

impl CoverageSummary {
    /// Summarize a slice of records.
    pub fn from_records(records: &[IndicatorRecord]) -> Self {
        let mut columns: Vec<ColumnCoverage> = RECORD_FIELDS[FIRST_VALUE_COLUMN..]
            .iter()
            .map(|&column| ColumnCoverage {
                column,
                available: 0,
            })
            .collect();

        for record in records {
            let values = record.values();
            for (coverage, value) in columns.iter_mut().zip(&values[FIRST_VALUE_COLUMN..]) {
                if value != UNAVAILABLE {
                    coverage.available += 1;
                }
            }
        }

        let companies: HashSet<&str> = records.iter().map(|r| r.company_name.as_str()).collect();

        Self {
            records: records.len(),
            companies: companies.len(),
            preferred: records
                .iter()
                .filter(|r| r.class == StockClass::Preferred)
                .count(),
            columns,
        }
    }

    /// Coverage of a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnCoverage> {
        self.columns.iter().find(|c| c.column == name)
    }
}

impl fmt::Display for CoverageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} records from {} companies ({} preferred)",
            self.records, self.companies, self.preferred
        )?;
        for coverage in &self.columns {
            writeln!(
                f,
                "  {:<18} {:>5} {:>6.1}%",
                coverage.column,
                coverage.available,
                coverage.percent(self.records)
            )?;
        }
        Ok(())
    }
}
