//! Demo of indicator extraction from an in-memory report table.
//!
//! This example demonstrates how to:
//! - Build a report table by hand
//! - Derive its report layout against a reference year
//! - Extract the company indicators and build per-class records
//!
//! Run with: cargo run --example extract_demo

use fintab_indicators::{
    CompanyIndicators, FinancialTable, IndicatorSet, IndicatorValue, RECORD_FIELDS,
    ReferenceYear, ReportLayout, StockQuotes, fields,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table = FinancialTable::builder()
        .header(["", "2021", "2022", "2023", "", "LTM"])
        .row(fields::NET_INCOME, ["Net income", "120", "135.5", "150", "", "162"])
        .row(fields::MARKET_CAP, ["Market cap", "900", "1 100", "1 250", "", "1 310"])
        .row(fields::DIVIDEND, ["Dividend", "4", "4.5", "5.25"])
        .row(fields::DIVIDEND_PREFERRED, ["Dividend pr", "6", "6.5", "7"])
        .build();

    let reference = ReferenceYear::today();
    println!("Reference fiscal year: {}", reference);

    let layout = ReportLayout::from_table(&table, reference)?;
    println!("Report columns: {}", layout.periods());
    println!("Fresh report set: {}", layout.is_fresh());

    let indicators = CompanyIndicators::extract(&table, &layout);
    let quotes = StockQuotes::new(
        Some(IndicatorValue::Number(98.4)),
        Some(IndicatorValue::Number(77.1)),
    );
    let records = IndicatorSet::build("Acme Holding", "ACME", &quotes, &indicators);

    println!("\n{}", RECORD_FIELDS.join("; "));
    for record in &records {
        println!("{}", record.values().join("; "));
    }

    Ok(())
}
