//! Numeric indicator values and cell coercion.

use serde::{Serialize, Serializer};
use std::fmt;

/// Textual form of [`IndicatorValue::Unavailable`].
pub const UNAVAILABLE: &str = "-";

/// A financial figure, or the marker that the report does not provide one.
///
/// `Unavailable` is not zero. Zero is a valid figure (no dividends paid);
/// `Unavailable` means the row, the column or a parseable number is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum IndicatorValue {
    /// A parsed number
    Number(f64),
    /// The indicator could not be determined
    #[default]
    Unavailable,
}

impl IndicatorValue {
    /// Coerce a cell text into a value.
    ///
    /// All whitespace is removed first, so thousands separators such as
    /// `"1 234 567"` (including non-breaking spaces) are accepted. Anything
    /// that does not parse into a finite `f64` is unavailable.
    pub fn parse(text: &str) -> Self {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.parse::<f64>() {
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Unavailable,
        }
    }

    /// Coerce an optional cell; a missing cell is unavailable.
    pub fn parse_cell(cell: Option<&String>) -> Self {
        cell.map_or(Self::Unavailable, |text| Self::parse(text))
    }

    /// Whether a number is present.
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Whether the value is the unavailable marker.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// The number, if present.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Unavailable => None,
        }
    }

    /// Arithmetic mean of `values` rounded to two decimals.
    ///
    /// Any unavailable input, an empty input, or a sum that overflows makes
    /// the mean unavailable.
    pub fn mean<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in values {
            match value {
                Self::Number(number) => {
                    sum += number;
                    count += 1;
                }
                Self::Unavailable => return Self::Unavailable,
            }
        }
        if count == 0 {
            return Self::Unavailable;
        }
        Self::from(round2(sum / count as f64))
    }
}

/// Non-finite numbers convert to [`IndicatorValue::Unavailable`].
impl From<f64> for IndicatorValue {
    fn from(number: f64) -> Self {
        if number.is_finite() {
            Self::Number(number)
        } else {
            Self::Unavailable
        }
    }
}

impl From<Option<f64>> for IndicatorValue {
    fn from(number: Option<f64>) -> Self {
        number.map_or(Self::Unavailable, Self::from)
    }
}

impl fmt::Display for IndicatorValue {
    /// `-` when unavailable, otherwise the number with at most two fraction
    /// digits and no trailing zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => {
                let rounded = round2(*number);
                // avoid printing "-0"
                let rounded = if rounded == 0.0 { 0.0 } else { rounded };
                write!(f, "{rounded}")
            }
            Self::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl Serialize for IndicatorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Round half away from zero to two decimal places.
///
/// Numbers too large to scale by 100 have no fraction digits left and are
/// returned unchanged.
pub fn round2(number: f64) -> f64 {
    let scaled = number * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        number
    }
}
