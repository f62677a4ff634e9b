//! Integration tests for report and listing page parsing

use fintab_data::{parse_directory, parse_report};
use fintab_indicators::{
    CompanyIndicators, IndicatorSet, IndicatorValue, ReferenceYear, ReportLayout, fields,
};

const REPORT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Лукойл</title></head>
<body>
<h1>Лукойл (LKOH) финансовая отчетность</h1>
<table class="simple-little-table financials" cellspacing="0">
  <tr class="header_row">
    <td></td><td>2019</td><td>2020</td><td>2021</td><td>2022</td><td>2023</td><td></td><td>LTM</td>
  </tr>
  <tr field="net_income">
    <th>Чистая прибыль, млрд руб</th>
    <td>Чистая прибыль, млрд руб</td>
    <td>640.2</td><td>15.2</td><td>773.4</td><td>795.3</td><td>1 155</td><td></td><td>1 201</td>
  </tr>
  <tr field="market_cap">
    <td>Капитализация</td>
    <td>4 700</td><td>3 900</td><td>4 400</td><td>3 000</td><td>5 200</td><td></td><td>5 630</td>
  </tr>
  <tr field="dividend">
    <td>Дивиденд</td>
    <td>542</td><td>259</td><td>596</td><td>693</td><td>945</td>
  </tr>
</table>
</body>
</html>"#;

const LISTING_PAGE: &str = r#"<html><body>
<table class="simple-little-table trades-table">
  <tr><th>№</th><th>Время</th><th>Название</th><th>Тикер</th><th>x</th><th>y</th><th>Цена</th></tr>
  <tr><td>1</td><td>18:50</td><td>Индекс МосБиржи</td><td>IMOEX</td><td></td><td></td><td>3 200</td></tr>
  <tr><td>2</td><td>18:50</td><td>Лукойл</td><td>LKOH</td><td></td><td></td><td>7 050.5</td></tr>
  <tr><td>3</td><td>18:50</td><td>Сургутнефтегаз</td><td>SNGS</td><td></td><td></td><td>27.1</td></tr>
  <tr><td>4</td><td>18:50</td><td>Сургутнефтегаз-п</td><td>SNGSP</td><td></td><td></td><td>55.3</td></tr>
</table>
</body></html>"#;

#[test]
fn test_report_page_to_records() {
    let report = parse_report(REPORT_PAGE).unwrap();
    assert_eq!(report.name, "Лукойл");

    let layout = ReportLayout::from_table(&report.table, ReferenceYear::new(2023)).unwrap();
    assert_eq!(layout.periods(), 5);
    assert!(layout.is_fresh());

    // the <th> label cell is not a <td>, so columns line up with the header
    let net_income = report.table.row(fields::NET_INCOME).unwrap();
    assert_eq!(net_income[0], "Чистая прибыль, млрд руб");

    let indicators = CompanyIndicators::extract(&report.table, &layout);
    assert_eq!(indicators.profit, IndicatorValue::Number(1201.0));
    assert_eq!(indicators.average_profit, IndicatorValue::Number(675.82));
    assert_eq!(indicators.capitalization, IndicatorValue::Number(5630.0));
    assert_eq!(indicators.dividends_ordinary, IndicatorValue::Number(945.0));
    assert!(indicators.dividends_preferred.is_unavailable());
    assert!(indicators.enterprise_value.is_unavailable());

    let listings = parse_directory(LISTING_PAGE, &["IMOEX".to_string()]).unwrap();
    let lukoil = listings.iter().find(|l| l.ticker == "LKOH").unwrap();
    let records = IndicatorSet::build(&report.name, &lukoil.ticker, &lukoil.quotes, &indicators);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].stock_price, IndicatorValue::Number(7050.5));
}

#[test]
fn test_listing_page() {
    let listings = parse_directory(LISTING_PAGE, &["IMOEX".to_string()]).unwrap();
    let tickers: Vec<&str> = listings.iter().map(|l| l.ticker.as_str()).collect();
    assert_eq!(tickers, ["LKOH", "SNGS"]);

    let surgut = &listings[1];
    assert_eq!(surgut.quotes.ordinary, Some(IndicatorValue::Number(27.1)));
    assert_eq!(surgut.quotes.preferred, Some(IndicatorValue::Number(55.3)));
}

#[test]
fn test_stale_report_page() {
    let report = parse_report(REPORT_PAGE).unwrap();
    let layout = ReportLayout::from_table(&report.table, ReferenceYear::new(2024)).unwrap();
    let indicators = CompanyIndicators::extract(&report.table, &layout);
    assert!(indicators.average_profit.is_unavailable());
    assert_eq!(indicators.profit, IndicatorValue::Number(1201.0));
}
