//! Per stock class indicator records handed to the output stage.

use crate::indicators::CompanyIndicators;
use crate::value::IndicatorValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix that turns an ordinary ticker into the preferred share ticker.
pub const PREFERRED_SUFFIX: char = 'P';

/// Column names of an [`IndicatorRecord`], in output order.
pub const RECORD_FIELDS: [&str; 10] = [
    "company name",
    "ticker",
    "stock",
    "profit",
    "average profit",
    "capitalization",
    "enterprise value",
    "clean assets",
    "book value",
    "dividends",
];

/// Share class of a company's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockClass {
    /// Ordinary (common) shares
    Ordinary,
    /// Preferred shares
    Preferred,
}

impl StockClass {
    /// Ticker of this class given the company's ordinary ticker.
    pub fn ticker(&self, ordinary_ticker: &str) -> String {
        match self {
            Self::Ordinary => ordinary_ticker.to_string(),
            Self::Preferred => format!("{ordinary_ticker}{PREFERRED_SUFFIX}"),
        }
    }
}

impl fmt::Display for StockClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordinary => f.write_str("ordinary"),
            Self::Preferred => f.write_str("preferred"),
        }
    }
}

/// Listed share classes of a company and their prices.
///
/// `None` means the class has no ticker on the listing. A listed class whose
/// price cell is blank or not a number carries
/// [`IndicatorValue::Unavailable`] and still gets a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StockQuotes {
    /// Ordinary share price, if listed
    pub ordinary: Option<IndicatorValue>,
    /// Preferred share price, if listed
    pub preferred: Option<IndicatorValue>,
}

impl StockQuotes {
    /// Quotes for both classes.
    pub const fn new(ordinary: Option<IndicatorValue>, preferred: Option<IndicatorValue>) -> Self {
        Self {
            ordinary,
            preferred,
        }
    }

    /// Quotes for a company without preferred shares.
    pub const fn ordinary_only(ordinary: IndicatorValue) -> Self {
        Self::new(Some(ordinary), None)
    }

    /// Quote of the given class, `None` when the class is not listed.
    pub const fn quote(&self, class: StockClass) -> Option<IndicatorValue> {
        match class {
            StockClass::Ordinary => self.ordinary,
            StockClass::Preferred => self.preferred,
        }
    }

    /// Price of the given class; unavailable when not listed.
    pub const fn price(&self, class: StockClass) -> IndicatorValue {
        match self.quote(class) {
            Some(price) => price,
            None => IndicatorValue::Unavailable,
        }
    }

    /// Mark the given class as listed at `price`.
    pub const fn set(&mut self, class: StockClass, price: IndicatorValue) {
        match class {
            StockClass::Ordinary => self.ordinary = Some(price),
            StockClass::Preferred => self.preferred = Some(price),
        }
    }

    /// Whether the given class is listed.
    pub const fn is_listed(&self, class: StockClass) -> bool {
        self.quote(class).is_some()
    }

    /// Whether any class is listed.
    pub const fn has_listed_class(&self) -> bool {
        self.ordinary.is_some() || self.preferred.is_some()
    }
}

/// Indicators of one stock class of one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRecord {
    /// Company name
    #[serde(rename = "company name")]
    pub company_name: String,
    /// Ticker of this share class
    pub ticker: String,
    /// Share price
    #[serde(rename = "stock")]
    pub stock_price: IndicatorValue,
    /// Net income (LTM)
    pub profit: IndicatorValue,
    /// Mean net income over the report years
    #[serde(rename = "average profit")]
    pub average_profit: IndicatorValue,
    /// Market capitalization
    pub capitalization: IndicatorValue,
    /// Enterprise value
    #[serde(rename = "enterprise value")]
    pub enterprise_value: IndicatorValue,
    /// Net assets
    #[serde(rename = "clean assets")]
    pub clean_assets: IndicatorValue,
    /// Book value
    #[serde(rename = "book value")]
    pub book_value: IndicatorValue,
    /// Dividend of this share class for the last full year
    pub dividends: IndicatorValue,
    /// Share class the record describes
    #[serde(skip)]
    pub class: StockClass,
}

impl IndicatorRecord {
    /// Textual values in [`RECORD_FIELDS`] order.
    pub fn values(&self) -> [String; 10] {
        [
            self.company_name.clone(),
            self.ticker.clone(),
            self.stock_price.to_string(),
            self.profit.to_string(),
            self.average_profit.to_string(),
            self.capitalization.to_string(),
            self.enterprise_value.to_string(),
            self.clean_assets.to_string(),
            self.book_value.to_string(),
            self.dividends.to_string(),
        ]
    }
}

/// Builds the records of one company.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSet;

impl IndicatorSet {
    /// Build the ordinary and preferred records of a company.
    ///
    /// A record is produced for every listed class, so the result holds
    /// zero, one or two records, ordinary first. An unparseable price of a
    /// listed class shows as unavailable in its record. Company-level
    /// indicators are shared; only the ticker, price and dividends differ.
    pub fn build(
        company_name: &str,
        ticker: &str,
        quotes: &StockQuotes,
        indicators: &CompanyIndicators,
    ) -> Vec<IndicatorRecord> {
        [StockClass::Ordinary, StockClass::Preferred]
            .into_iter()
            .filter(|class| quotes.is_listed(*class))
            .map(|class| Self::record(company_name, ticker, class, quotes, indicators))
            .collect()
    }

    fn record(
        company_name: &str,
        ticker: &str,
        class: StockClass,
        quotes: &StockQuotes,
        indicators: &CompanyIndicators,
    ) -> IndicatorRecord {
        let dividends = match class {
            StockClass::Ordinary => indicators.dividends_ordinary,
            StockClass::Preferred => indicators.dividends_preferred,
        };
        IndicatorRecord {
            company_name: company_name.to_string(),
            ticker: class.ticker(ticker),
            stock_price: quotes.price(class),
            profit: indicators.profit,
            average_profit: indicators.average_profit,
            capitalization: indicators.capitalization,
            enterprise_value: indicators.enterprise_value,
            clean_assets: indicators.clean_assets,
            book_value: indicators.book_value,
            dividends,
            class,
        }
    }
}
