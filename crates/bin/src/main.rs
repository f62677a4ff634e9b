//! fintab CLI binary.
//!
//! Scrapes the financial indicators of listed companies into CSV or JSON.

use clap::{Parser, Subcommand};
use fintab::data::CompanyListing;
use fintab::indicators::{IndicatorValue, ReferenceYear, StockQuotes};
use fintab::output::{CoverageSummary, ExportFormat, Exporter, RunExport};
use fintab::{RunEvent, ScrapeConfig, Scraper};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default output file of a full run.
const DEFAULT_OUTPUT: &str = "fin_indicators_companies.csv";

#[derive(Parser)]
#[command(name = "fintab")]
#[command(about = "fintab: financial indicators of listed companies", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference year for report freshness (defaults to the current rule)
    #[arg(long, global = true)]
    reference_year: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every listed company into a file
    Run {
        /// Output file
        #[arg(long, short, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Output format: csv, json or pretty-json (guessed from the file name)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Number of report pages fetched at once
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Scrape one company and print its records
    Company {
        /// Ordinary ticker
        ticker: String,

        /// Ordinary share price
        #[arg(long)]
        ordinary_price: Option<f64>,

        /// Preferred share price
        #[arg(long)]
        preferred_price: Option<f64>,

        /// Output format: csv, json or pretty-json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
    },

    /// Print the listing page
    List,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let reference_year = cli
        .reference_year
        .map_or_else(ReferenceYear::today, ReferenceYear::new);

    match cli.command {
        Commands::Run {
            output,
            format,
            concurrency,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(concurrency) = concurrency {
                config.concurrency = concurrency;
            }
            let format = format.unwrap_or_else(|| ExportFormat::for_path(&output));
            run_all(config, reference_year, &output, format).await?;
        }
        Commands::Company {
            ticker,
            ordinary_price,
            preferred_price,
            format,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let quotes = (ordinary_price.is_some() || preferred_price.is_some()).then(|| {
                StockQuotes::new(
                    ordinary_price.map(IndicatorValue::from),
                    preferred_price.map(IndicatorValue::from),
                )
            });
            scrape_company(config, reference_year, &ticker, quotes, format).await?;
        }
        Commands::List => {
            let config = load_config(cli.config.as_deref())?;
            list_companies(config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScrapeConfig, fintab::ConfigError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            ScrapeConfig::load(path)
        }
        None => Ok(ScrapeConfig::default()),
    }
}

async fn run_all(
    config: ScrapeConfig,
    reference_year: ReferenceYear,
    output: &Path,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let scraper = Scraper::new(config)?;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching listing...");
    pb.enable_steady_tick(Duration::from_millis(120));
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
        .progress_chars("█▓░");

    let summary = scraper
        .run(reference_year, |event| match event {
            RunEvent::Listed { companies } => {
                pb.set_style(style.clone());
                pb.set_length(companies as u64);
                pb.set_message(format!("reference year {reference_year}"));
            }
            RunEvent::Processed { ticker, .. } => {
                pb.set_message(ticker.to_string());
                pb.inc(1);
            }
            RunEvent::Skipped { ticker } => {
                pb.set_message(format!("{ticker} skipped"));
                pb.inc(1);
            }
        })
        .await;

    let summary = match summary {
        Ok(summary) => {
            pb.finish_with_message(format!(
                "{} companies, {} skipped",
                summary.processed,
                summary.skipped.len()
            ));
            summary
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            return Err(e.into());
        }
    };

    RunExport::new(&summary.records, summary.processed).export_to_file(output, format)?;

    println!("\n{}", CoverageSummary::from_records(&summary.records));
    for skipped in &summary.skipped {
        println!("  skipped {}: {}", skipped.ticker, skipped.reason);
    }
    println!("Wrote {}", output.display());

    Ok(())
}

async fn scrape_company(
    config: ScrapeConfig,
    reference_year: ReferenceYear,
    ticker: &str,
    quotes: Option<StockQuotes>,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let scraper = Scraper::new(config)?;

    let listing = match quotes {
        Some(quotes) => CompanyListing {
            ticker: ticker.to_uppercase(),
            quotes,
        },
        None => scraper.find_listing(ticker).await?,
    };

    let outcome = scraper.fetch_company(&listing, reference_year).await?;
    if outcome.records.is_empty() {
        println!("{}: no listed share class", listing.ticker);
        return Ok(());
    }
    if !outcome.fresh {
        eprintln!(
            "Note: report of {} does not cover {reference_year}; mean profit and dividends are unavailable",
            outcome.name
        );
    }

    print!("{}", outcome.records.export_to_string(format)?);
    if format != ExportFormat::Csv {
        println!();
    }
    Ok(())
}

async fn list_companies(config: ScrapeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scraper = Scraper::new(config)?;
    let listings = scraper.fetch_listings().await?;

    println!("{:<14} {:>12} {:>12}", "ticker", "ordinary", "preferred");
    for listing in &listings {
        println!(
            "{:<14} {:>12} {:>12}",
            listing.ticker,
            quote_text(listing.quotes.ordinary),
            quote_text(listing.quotes.preferred)
        );
    }
    println!("\n{} companies", listings.len());

    Ok(())
}

/// Price column of `list`: blank for an unlisted class, `-` for a listed
/// class without a price.
fn quote_text(quote: Option<IndicatorValue>) -> String {
    quote.map_or_else(String::new, |price| price.to_string())
}
