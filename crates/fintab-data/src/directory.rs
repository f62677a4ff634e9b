//! Parsing of the share listing page into per-company quotes.

use crate::error::{DataError, Result};
use crate::html::{cell_texts, selector};
use fintab_indicators::{IndicatorValue, StockClass, StockQuotes};
use scraper::Html;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// CSS selector of the listing table.
pub const LISTING_TABLE: &str = "table.simple-little-table.trades-table";

/// Column holding the ticker.
pub const TICKER_COLUMN: usize = 3;

/// Column holding the last price.
pub const PRICE_COLUMN: usize = 6;

/// Length of a preferred share ticker (ordinary ticker plus one letter).
pub const PREFERRED_TICKER_LEN: usize = 5;

/// One company of the listing with the quotes of its share classes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyListing {
    /// Ordinary ticker of the company
    pub ticker: String,
    /// Prices of the traded share classes
    pub quotes: StockQuotes,
}

impl CompanyListing {
    /// A listing with no traded class yet.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            quotes: StockQuotes::default(),
        }
    }
}

/// Split a listed ticker into the company ticker and its share class.
///
/// A five character ticker is the preferred share of the company named by
/// its first four characters; anything else is an ordinary share.
pub fn classify_ticker(ticker: &str) -> (String, StockClass) {
    if ticker.chars().count() == PREFERRED_TICKER_LEN {
        let company: String = ticker.chars().take(PREFERRED_TICKER_LEN - 1).collect();
        (company, StockClass::Preferred)
    } else {
        (ticker.to_string(), StockClass::Ordinary)
    }
}

/// Parse the listing page.
///
/// Rows with fewer than four cells (headers, separators) are skipped, as are
/// tickers in `ignore`. Ordinary and preferred rows of the same company are
/// merged into one [`CompanyListing`]; companies keep the order in which
/// they first appear. A listed class whose price cell is blank or not a
/// number stays listed with an unavailable price.
pub fn parse_directory(html: &str, ignore: &[String]) -> Result<Vec<CompanyListing>> {
    let document = Html::parse_document(html);
    let table_selector = selector(LISTING_TABLE)?;
    let tr = selector("tr")?;
    let td = selector("td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| DataError::Structure(format!("listing table `{LISTING_TABLE}` not found")))?;

    let mut listings: Vec<CompanyListing> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in table.select(&tr) {
        let cells = cell_texts(row, &td);
        let Some(listed) = cells.get(TICKER_COLUMN).map(|t| t.trim()) else {
            continue;
        };
        if listed.is_empty() || ignore.iter().any(|ignored| ignored == listed) {
            continue;
        }

        let (ticker, class) = classify_ticker(listed);
        let price = IndicatorValue::parse_cell(cells.get(PRICE_COLUMN));
        if price.is_unavailable() {
            debug!(ticker = listed, "listed without a numeric price");
        }

        let index = match positions.get(&ticker) {
            Some(&index) => index,
            None => {
                positions.insert(ticker.clone(), listings.len());
                listings.push(CompanyListing::new(ticker));
                listings.len() - 1
            }
        };
        listings[index].quotes.set(class, price);
    }

    debug!(companies = listings.len(), "parsed listing page");
    Ok(listings)
}
