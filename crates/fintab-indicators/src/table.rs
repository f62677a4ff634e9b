//! Row/column model of a yearly financial report.

use crate::error::{Result, StructureError};
use serde::{Deserialize, Serialize};

/// A single indicator row: its field identifier and the ordered cell texts.
///
/// Cell 0 holds the row label; the historical report columns follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Field identifier the row is keyed by (e.g. `net_income`)
    pub field: String,
    /// Cell texts in column order
    pub cells: Vec<String>,
}

impl TableRow {
    /// Create a row from a field identifier and its cell texts.
    pub fn new<F, I, S>(field: F, cells: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// A parsed report table.
///
/// The table is owned by the caller and only read by the extraction engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialTable {
    header: Option<Vec<String>>,
    rows: Vec<TableRow>,
}

impl FinancialTable {
    /// Create a table from an optional header row and indicator rows.
    pub const fn new(header: Option<Vec<String>>, rows: Vec<TableRow>) -> Self {
        Self { header, rows }
    }

    /// Start building a table.
    pub fn builder() -> FinancialTableBuilder {
        FinancialTableBuilder::default()
    }

    /// The header row holding the report period labels.
    pub fn header(&self) -> Result<&[String]> {
        self.header.as_deref().ok_or(StructureError::MissingHeader)
    }

    /// Cell texts of the first row keyed by `field`, if the table reports it.
    pub fn row(&self, field: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|row| row.field == field)
            .map(|row| row.cells.as_slice())
    }

    /// All indicator rows in document order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of indicator rows (the header is not counted).
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no indicator rows.
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Incremental builder for [`FinancialTable`].
#[derive(Debug, Default)]
pub struct FinancialTableBuilder {
    header: Option<Vec<String>>,
    rows: Vec<TableRow>,
}

impl FinancialTableBuilder {
    /// Set the header row.
    pub fn header<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = Some(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Append an indicator row.
    pub fn row<F, I, S>(mut self, field: F, cells: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(TableRow::new(field, cells));
        self
    }

    /// Append an already constructed row.
    pub fn push(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Finish the table.
    pub fn build(self) -> FinancialTable {
        FinancialTable::new(self.header, self.rows)
    }
}
