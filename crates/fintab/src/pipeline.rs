//! Scrape pipeline: listing page, report pages, indicator records.

use crate::config::{ConfigError, ScrapeConfig};
use fintab_data::{CompanyListing, DataError, HtmlFetcher, parse_directory, parse_report};
use fintab_indicators::{
    CompanyIndicators, IndicatorRecord, IndicatorSet, ReferenceYear, ReportLayout,
    StructureError,
};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors of the scrape pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetching or parsing a page failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A report table does not have the expected structure.
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The ticker is not on the listing page.
    #[error("ticker {0} is not listed")]
    UnknownTicker(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Records extracted for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyOutcome {
    /// Ordinary ticker
    pub ticker: String,
    /// Company name from the report page
    pub name: String,
    /// Whether the report covers the reference year
    pub fresh: bool,
    /// Zero, one or two records (ordinary first)
    pub records: Vec<IndicatorRecord>,
}

/// A company left out of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCompany {
    /// Ordinary ticker
    pub ticker: String,
    /// Why the company was skipped
    pub reason: String,
}

/// Result of a full run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// All records in listing order
    pub records: Vec<IndicatorRecord>,
    /// Companies whose report was processed
    pub processed: usize,
    /// Companies skipped because of an error
    pub skipped: Vec<SkippedCompany>,
}

/// Progress notifications of [`Scraper::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent<'a> {
    /// The listing page was parsed.
    Listed {
        /// Number of companies to process
        companies: usize,
    },
    /// A company was processed.
    Processed {
        /// Ordinary ticker
        ticker: &'a str,
        /// Records produced
        records: usize,
    },
    /// A company was skipped.
    Skipped {
        /// Ordinary ticker
        ticker: &'a str,
    },
}

/// Extract the records of one company from its report page.
///
/// Every share class listed in `listing` produces a record, priced or not.
pub fn process_report(
    html: &str,
    listing: &CompanyListing,
    reference_year: ReferenceYear,
) -> Result<CompanyOutcome> {
    let report = parse_report(html)?;
    let layout = ReportLayout::from_table(&report.table, reference_year)?;
    let indicators = CompanyIndicators::extract(&report.table, &layout);
    let records = IndicatorSet::build(&report.name, &listing.ticker, &listing.quotes, &indicators);

    debug!(
        ticker = %listing.ticker,
        periods = layout.periods(),
        fresh = layout.is_fresh(),
        available = indicators.available_count(),
        records = records.len(),
        "extracted indicators"
    );

    Ok(CompanyOutcome {
        ticker: listing.ticker.clone(),
        name: report.name,
        fresh: layout.is_fresh(),
        records,
    })
}

/// Runs scrapes against the configured pages.
#[derive(Debug, Clone)]
pub struct Scraper {
    config: ScrapeConfig,
    fetcher: HtmlFetcher,
}

impl Scraper {
    /// Create a scraper, validating the config.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HtmlFetcher::with_options(config.fetcher_options())?;
        Ok(Self { config, fetcher })
    }

    /// The active configuration.
    pub const fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetch and parse the listing page.
    pub async fn fetch_listings(&self) -> Result<Vec<CompanyListing>> {
        let html = self.fetcher.fetch_page(&self.config.directory_url).await?;
        let listings = parse_directory(&html, &self.config.ignore_list)?;
        info!(companies = listings.len(), "fetched listing");
        Ok(listings)
    }

    /// Find one company on the listing page.
    pub async fn find_listing(&self, ticker: &str) -> Result<CompanyListing> {
        self.fetch_listings()
            .await?
            .into_iter()
            .find(|listing| listing.ticker.eq_ignore_ascii_case(ticker))
            .ok_or_else(|| PipelineError::UnknownTicker(ticker.to_string()))
    }

    /// Fetch a company's report page and extract its records.
    ///
    /// A company without any listed share class yields no records and its
    /// page is not fetched.
    pub async fn fetch_company(
        &self,
        listing: &CompanyListing,
        reference_year: ReferenceYear,
    ) -> Result<CompanyOutcome> {
        if !listing.quotes.has_listed_class() {
            debug!(ticker = %listing.ticker, "no listed share class");
            return Ok(CompanyOutcome {
                ticker: listing.ticker.clone(),
                name: String::new(),
                fresh: false,
                records: Vec::new(),
            });
        }

        let url = self.config.report_url(&listing.ticker);
        let html = self.fetcher.fetch_page(&url).await?;
        process_report(&html, listing, reference_year)
    }

    /// Scrape every listed company.
    ///
    /// A failure to load the listing aborts the run; a failing company is
    /// logged and skipped. Records keep the listing order.
    pub async fn run<F>(&self, reference_year: ReferenceYear, on_event: F) -> Result<RunSummary>
    where
        F: FnMut(RunEvent<'_>),
    {
        let listings = self.fetch_listings().await?;
        Ok(self.run_listings(&listings, reference_year, on_event).await)
    }

    /// Scrape the given companies.
    pub async fn run_listings<F>(
        &self,
        listings: &[CompanyListing],
        reference_year: ReferenceYear,
        mut on_event: F,
    ) -> RunSummary
    where
        F: FnMut(RunEvent<'_>),
    {
        info!(
            companies = listings.len(),
            reference_year = reference_year.year(),
            concurrency = self.config.concurrency,
            "starting run"
        );
        on_event(RunEvent::Listed {
            companies: listings.len(),
        });

        let mut results = std::pin::pin!(
            stream::iter(listings)
                .map(|listing| async move {
                    (listing, self.fetch_company(listing, reference_year).await)
                })
                .buffered(self.config.concurrency)
        );

        let mut summary = RunSummary::default();
        while let Some((listing, result)) = results.next().await {
            match result {
                Ok(outcome) => {
                    on_event(RunEvent::Processed {
                        ticker: &listing.ticker,
                        records: outcome.records.len(),
                    });
                    summary.processed += 1;
                    summary.records.extend(outcome.records);
                }
                Err(err) => {
                    warn!(ticker = %listing.ticker, error = %err, "skipping company");
                    on_event(RunEvent::Skipped {
                        ticker: &listing.ticker,
                    });
                    summary.skipped.push(SkippedCompany {
                        ticker: listing.ticker.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            records = summary.records.len(),
            processed = summary.processed,
            skipped = summary.skipped.len(),
            "run finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintab_indicators::{IndicatorValue, StockQuotes};
    use rstest::rstest;

    const PAGE: &str = r#"<html><body>
        <h1>Татнефть (TATN)</h1>
        <table>
          <tr class="header_row">
            <td></td><td>2021</td><td>2022</td><td>2023</td><td></td><td>LTM</td>
          </tr>
          <tr field="net_income"><td>Прибыль</td><td>200</td><td>300</td><td>400</td><td></td><td>450</td></tr>
          <tr field="market_cap"><td>Кап</td><td>1 000</td><td>1 200</td><td>1 500</td><td></td><td>1 800</td></tr>
          <tr field="dividend"><td>Див</td><td>40</td><td>50</td><td>60.5</td></tr>
          <tr field="dividend_pr"><td>Див ап</td><td>40</td><td>50</td><td>60.7</td></tr>
        </table>
        </body></html>"#;

    fn listing(ordinary: Option<f64>, preferred: Option<f64>) -> CompanyListing {
        let mut listing = CompanyListing::new("TATN");
        listing.quotes = StockQuotes::new(
            ordinary.map(IndicatorValue::from),
            preferred.map(IndicatorValue::from),
        );
        listing
    }

    #[test]
    fn test_process_report_both_classes() {
        let outcome =
            process_report(PAGE, &listing(Some(650.0), Some(640.0)), ReferenceYear::new(2023))
                .unwrap();
        assert_eq!(outcome.name, "Татнефть");
        assert!(outcome.fresh);
        assert_eq!(outcome.records.len(), 2);

        let ordinary = &outcome.records[0];
        assert_eq!(ordinary.ticker, "TATN");
        assert_eq!(ordinary.profit, IndicatorValue::Number(450.0));
        assert_eq!(ordinary.average_profit, IndicatorValue::Number(300.0));
        assert_eq!(ordinary.capitalization, IndicatorValue::Number(1800.0));
        assert_eq!(ordinary.dividends, IndicatorValue::Number(60.5));

        let preferred = &outcome.records[1];
        assert_eq!(preferred.ticker, "TATNP");
        assert_eq!(preferred.stock_price, IndicatorValue::Number(640.0));
        assert_eq!(preferred.dividends, IndicatorValue::Number(60.7));
    }

    #[test]
    fn test_listed_class_with_blank_price_keeps_record() {
        let listing = &parse_directory(
            r#"<table class="simple-little-table trades-table">
                <tr><td>1</td><td>x</td><td>Татнефть</td><td>TATN</td><td></td><td></td><td></td></tr>
            </table>"#,
            &[],
        )
        .unwrap()[0];

        let outcome = process_report(PAGE, listing, ReferenceYear::new(2023)).unwrap();
        assert_eq!(outcome.records.len(), 1);
        let record = &outcome.records[0];
        assert_eq!(record.ticker, "TATN");
        assert!(record.stock_price.is_unavailable());
        assert_eq!(record.profit, IndicatorValue::Number(450.0));
    }

    #[rstest]
    #[case(2023, true)]
    #[case(2024, false)]
    fn test_process_report_freshness(#[case] year: i32, #[case] fresh: bool) {
        let outcome =
            process_report(PAGE, &listing(Some(650.0), None), ReferenceYear::new(year)).unwrap();
        assert_eq!(outcome.fresh, fresh);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].average_profit.is_available(), fresh);
        assert_eq!(outcome.records[0].profit, IndicatorValue::Number(450.0));
    }

    #[test]
    fn test_process_report_missing_header() {
        let page = r#"<h1>X</h1><table><tr field="net_income"><td>1</td></tr></table>"#;
        let err = process_report(page, &listing(Some(1.0), None), ReferenceYear::new(2023))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Structure(StructureError::MissingHeader)
        ));
    }

    #[tokio::test]
    async fn test_untraded_company_is_not_fetched() {
        let config = ScrapeConfig {
            report_url_template: "http://127.0.0.1:9/{}".to_string(),
            ..ScrapeConfig::default()
        };
        let scraper = Scraper::new(config).unwrap();
        let outcome = scraper
            .fetch_company(&listing(None, None), ReferenceYear::new(2023))
            .await
            .unwrap();
        assert!(outcome.records.is_empty());
    }

    #[tokio::test]
    async fn test_run_listings_empty() {
        let scraper = Scraper::new(ScrapeConfig::default()).unwrap();
        let mut events = Vec::new();
        let summary = scraper
            .run_listings(&[], ReferenceYear::new(2023), |event| {
                if let RunEvent::Listed { companies } = event {
                    events.push(companies);
                }
            })
            .await;
        assert_eq!(events, vec![0]);
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScrapeConfig {
            concurrency: 0,
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            Scraper::new(config),
            Err(PipelineError::Config(ConfigError::Invalid(_)))
        ));
    }
}
