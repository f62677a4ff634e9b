//! The company-level indicator set extracted from one report table.

use crate::extract::ValueKind;
use crate::layout::ReportLayout;
use crate::table::FinancialTable;
use crate::value::IndicatorValue;
use serde::Serialize;
use tracing::debug;

/// Field identifiers of the report rows, as used by the source page markup.
pub mod fields {
    /// Net income
    pub const NET_INCOME: &str = "net_income";
    /// Market capitalization
    pub const MARKET_CAP: &str = "market_cap";
    /// Enterprise value
    pub const ENTERPRISE_VALUE: &str = "ev";
    /// Dividend per ordinary share
    pub const DIVIDEND: &str = "dividend";
    /// Dividend per preferred share
    pub const DIVIDEND_PREFERRED: &str = "dividend_pr";
    /// Net assets
    pub const ASSETS: &str = "assets";
    /// Book value
    pub const BOOK_VALUE: &str = "book_value";
}

/// Which row and which value kind an indicator is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorDef {
    /// Row field identifier
    pub field: &'static str,
    /// Value to take from the row
    pub kind: ValueKind,
}

impl IndicatorDef {
    /// Define an indicator.
    pub const fn new(field: &'static str, kind: ValueKind) -> Self {
        Self { field, kind }
    }

    /// Read this indicator from a table.
    pub fn read(&self, table: &FinancialTable, layout: &ReportLayout) -> IndicatorValue {
        layout.extract(table.row(self.field), self.kind)
    }
}

/// Net income over the trailing twelve months.
pub const PROFIT: IndicatorDef = IndicatorDef::new(fields::NET_INCOME, ValueKind::Latest);
/// Net income averaged over the historical reports.
pub const AVERAGE_PROFIT: IndicatorDef = IndicatorDef::new(fields::NET_INCOME, ValueKind::Mean);
/// Current market capitalization.
pub const CAPITALIZATION: IndicatorDef = IndicatorDef::new(fields::MARKET_CAP, ValueKind::Latest);
/// Current enterprise value.
pub const ENTERPRISE_VALUE: IndicatorDef =
    IndicatorDef::new(fields::ENTERPRISE_VALUE, ValueKind::Latest);
/// Current net assets.
pub const CLEAN_ASSETS: IndicatorDef = IndicatorDef::new(fields::ASSETS, ValueKind::Latest);
/// Current book value.
pub const BOOK_VALUE: IndicatorDef = IndicatorDef::new(fields::BOOK_VALUE, ValueKind::Latest);
/// Ordinary dividend of the last full year.
pub const DIVIDENDS_ORDINARY: IndicatorDef =
    IndicatorDef::new(fields::DIVIDEND, ValueKind::LastFullYear);
/// Preferred dividend of the last full year.
pub const DIVIDENDS_PREFERRED: IndicatorDef =
    IndicatorDef::new(fields::DIVIDEND_PREFERRED, ValueKind::LastFullYear);

/// All indicators extracted from a company's report table.
///
/// Built in a single pass by [`CompanyIndicators::extract`]; every field is
/// either a number or [`IndicatorValue::Unavailable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CompanyIndicators {
    /// Net income (LTM)
    pub profit: IndicatorValue,
    /// Mean net income over the report years
    pub average_profit: IndicatorValue,
    /// Market capitalization (LTM)
    pub capitalization: IndicatorValue,
    /// Enterprise value (LTM)
    pub enterprise_value: IndicatorValue,
    /// Net assets (LTM)
    pub clean_assets: IndicatorValue,
    /// Book value (LTM)
    pub book_value: IndicatorValue,
    /// Ordinary share dividend of the last full year
    pub dividends_ordinary: IndicatorValue,
    /// Preferred share dividend of the last full year
    pub dividends_preferred: IndicatorValue,
}

impl CompanyIndicators {
    /// Extract every indicator using one layout snapshot.
    pub fn extract(table: &FinancialTable, layout: &ReportLayout) -> Self {
        let indicators = Self {
            profit: PROFIT.read(table, layout),
            average_profit: AVERAGE_PROFIT.read(table, layout),
            capitalization: CAPITALIZATION.read(table, layout),
            enterprise_value: ENTERPRISE_VALUE.read(table, layout),
            clean_assets: CLEAN_ASSETS.read(table, layout),
            book_value: BOOK_VALUE.read(table, layout),
            dividends_ordinary: DIVIDENDS_ORDINARY.read(table, layout),
            dividends_preferred: DIVIDENDS_PREFERRED.read(table, layout),
        };
        debug!(
            available = indicators.available_count(),
            total = Self::COUNT,
            "extracted company indicators"
        );
        indicators
    }

    /// Number of indicators in the set.
    pub const COUNT: usize = 8;

    /// How many indicators carry a number.
    pub fn available_count(&self) -> usize {
        [
            self.profit,
            self.average_profit,
            self.capitalization,
            self.enterprise_value,
            self.clean_assets,
            self.book_value,
            self.dividends_ordinary,
            self.dividends_preferred,
        ]
        .iter()
        .filter(|value| value.is_available())
        .count()
    }
}
