//! End-to-end tests for indicator extraction from report tables

use approx::assert_relative_eq;
use fintab_indicators::{
    CompanyIndicators, FinancialTable, IndicatorSet, IndicatorValue, ReferenceYear, ReportLayout,
    StockClass, StockQuotes, StructureError, ValueKind, fields,
};
use rstest::rstest;

/// A report table shaped like the upstream yearly report page: five report
/// years, a blank spacer, then the LTM column.
fn report_table() -> FinancialTable {
    FinancialTable::builder()
        .header(["", "2019", "2020", "2021", "2022", "2023", "", "LTM"])
        .row(
            fields::NET_INCOME,
            ["Чистая прибыль", "845", "760", "1 246", "270", "1 493", "", "1 508"],
        )
        .row(
            fields::MARKET_CAP,
            ["Капитализация", "4 400", "4 700", "6 200", "3 300", "5 900", "", "6 540.5"],
        )
        .row(fields::ENTERPRISE_VALUE, ["EV", "", "", "", "", "", "", ""])
        .row(fields::DIVIDEND, ["Дивиденд", "16", "18.7", "18.7", "0", "25", "", ""])
        .row(fields::DIVIDEND_PREFERRED, ["Дивиденд ап", "16", "18.7", "18.7", "0", "25"])
        .row(fields::ASSETS, ["Чистые активы", "4 000", "4 300", "4 800", "5 100", "5 800", "", "5 900"])
        .row(fields::BOOK_VALUE, ["Балансовая стоимость", "4 000", "4 300", "4 800", "5 100", "5 800"])
        .build()
}

#[test]
fn test_full_extraction_workflow() {
    let table = report_table();
    let layout = ReportLayout::from_table(&table, ReferenceYear::new(2023)).unwrap();
    assert_eq!(layout.periods(), 5);
    assert!(layout.is_fresh());

    let indicators = CompanyIndicators::extract(&table, &layout);
    assert_eq!(indicators.profit, IndicatorValue::Number(1508.0));
    assert_eq!(indicators.average_profit, IndicatorValue::Number(922.8));
    assert_eq!(indicators.capitalization, IndicatorValue::Number(6540.5));
    assert!(indicators.enterprise_value.is_unavailable());
    assert_eq!(indicators.clean_assets, IndicatorValue::Number(5900.0));
    // row ends at the last report column, so there is no LTM cell
    assert!(indicators.book_value.is_unavailable());
    assert_eq!(indicators.dividends_ordinary, IndicatorValue::Number(25.0));
    assert_eq!(indicators.dividends_preferred, IndicatorValue::Number(25.0));

    let quotes = StockQuotes::new(
        Some(IndicatorValue::Number(310.25)),
        Some(IndicatorValue::Number(309.9)),
    );
    let records = IndicatorSet::build("Сбербанк", "SBER", &quotes, &indicators);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].ticker, "SBER");
    assert_eq!(records[1].ticker, "SBERP");
    assert_eq!(
        records[1].values(),
        [
            "Сбербанк", "SBERP", "309.9", "1508", "922.8", "6540.5", "-", "5900", "-", "25"
        ]
        .map(String::from)
    );
}

#[test]
fn test_stale_report_keeps_latest_values_only() {
    let table = report_table();
    let layout = ReportLayout::from_table(&table, ReferenceYear::new(2024)).unwrap();
    assert!(!layout.is_fresh());

    let indicators = CompanyIndicators::extract(&table, &layout);
    assert_eq!(indicators.profit, IndicatorValue::Number(1508.0));
    assert!(indicators.average_profit.is_unavailable());
    assert!(indicators.dividends_ordinary.is_unavailable());
    assert!(indicators.dividends_preferred.is_unavailable());
}

#[test]
fn test_missing_header_aborts_company() {
    let table = FinancialTable::builder()
        .row(fields::NET_INCOME, ["Net income", "1", "2"])
        .build();
    let err = ReportLayout::from_table(&table, ReferenceYear::new(2023)).unwrap_err();
    assert_eq!(err, StructureError::MissingHeader);
    assert_eq!(err.to_string(), "report table has no header row");
}

#[rstest]
#[case(&["1", "2", "3"], 2.0)]
#[case(&["10.5", "11.0", "12.25"], 11.25)]
#[case(&["-5", "5", "1 000"], 333.33)]
#[case(&["0.001", "0.002", "0.004"], 0.0)]
fn test_mean_matches_rounded_average(#[case] years: &[&str], #[case] expected: f64) {
    let mut cells = vec!["net_income"];
    cells.extend_from_slice(years);
    let table = FinancialTable::builder()
        .header(["Indicator", "2021", "2022", "2023"])
        .row(fields::NET_INCOME, cells)
        .build();
    let layout = ReportLayout::from_table(&table, ReferenceYear::new(2023)).unwrap();

    let mean = layout
        .extract(table.row(fields::NET_INCOME), ValueKind::Mean)
        .as_f64()
        .unwrap();
    assert_relative_eq!(mean, expected, epsilon = 1e-9);
}

#[rstest]
#[case(ValueKind::Latest)]
#[case(ValueKind::Mean)]
#[case(ValueKind::LastFullYear)]
fn test_unreported_indicator_is_unavailable(#[case] kind: ValueKind) {
    let table = report_table();
    let layout = ReportLayout::from_table(&table, ReferenceYear::new(2023)).unwrap();
    assert!(layout.extract(table.row("no_such_field"), kind).is_unavailable());
}

#[test]
fn test_company_without_listed_stock_produces_nothing() {
    let table = report_table();
    let layout = ReportLayout::from_table(&table, ReferenceYear::new(2023)).unwrap();
    let indicators = CompanyIndicators::extract(&table, &layout);
    let records = IndicatorSet::build("Acme", "ACME", &StockQuotes::default(), &indicators);
    assert!(records.is_empty());

    let records = IndicatorSet::build(
        "Acme",
        "ACME",
        &StockQuotes::ordinary_only(IndicatorValue::Number(1.0)),
        &indicators,
    );
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].class, StockClass::Ordinary);
}
