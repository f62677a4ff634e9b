//! Export of indicator records to CSV and JSON.

use fintab_indicators::{IndicatorRecord, RECORD_FIELDS};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Field delimiter of the CSV output.
pub const CSV_DELIMITER: u8 = b';';

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output is not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Semicolon separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension, defaulting to CSV.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        info!(path = %path.display(), bytes = content.len(), "wrote export file");
        Ok(())
    }
}

/// Write `records` as `;` separated values, preceded by the header row when
/// `header` is set.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn records_to_csv(records: &[IndicatorRecord], header: bool) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(false)
        .from_writer(vec![]);
    if header {
        wtr.write_record(RECORD_FIELDS)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

impl Exporter for [IndicatorRecord] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(self, !self.is_empty()),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Records of a scrape run together with the number of companies processed.
///
/// The CSV output carries the header row whenever at least one company was
/// processed, even if none of them produced a record.
#[derive(Debug, Clone, Copy)]
pub struct RunExport<'a> {
    records: &'a [IndicatorRecord],
    companies: usize,
}

impl<'a> RunExport<'a> {
    /// Wrap the records of a run over `companies` processed companies.
    pub const fn new(records: &'a [IndicatorRecord], companies: usize) -> Self {
        Self { records, companies }
    }
}

impl Exporter for RunExport<'_> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(self.records, self.companies > 0),
            _ => self.records.export_to_string(format),
        }
    }
}

impl Exporter for IndicatorRecord {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        std::slice::from_ref(self).export_to_string(format)
    }
}
