//! Error types for indicator extraction.

use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, StructureError>;

/// The report table is structurally unusable.
///
/// Missing rows and non-numeric cells are not errors; they resolve to
/// [`IndicatorValue::Unavailable`](crate::IndicatorValue::Unavailable). Only a
/// table whose layout cannot be determined at all is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// The header row holding the report period labels is absent
    #[error("report table has no header row")]
    MissingHeader,
}
