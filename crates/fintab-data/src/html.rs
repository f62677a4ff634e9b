//! Parsing of a company's yearly report page into a [`FinancialTable`].

use crate::error::{DataError, Result};
use fintab_indicators::{FinancialTable, TableRow, UNAVAILABLE};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::debug;

/// Attribute carrying a row's field identifier.
pub const FIELD_ATTR: &str = "field";

/// Class of the row holding the report period labels.
pub const HEADER_ROW_CLASS: &str = "header_row";

/// A company report page reduced to what the extraction engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyReport {
    /// Company name from the page title, `-` when absent
    pub name: String,
    /// Indicator rows and the period header
    pub table: FinancialTable,
}

/// Compile a CSS selector.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Structure(format!("invalid selector {css}: {e}")))
}

/// Concatenated text of an element.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Texts of all `<td>` cells below an element, in document order.
pub(crate) fn cell_texts(element: ElementRef<'_>, td: &Selector) -> Vec<String> {
    element.select(td).map(text_of).collect()
}

/// Parse a report page.
///
/// Every `<tr field="…">` becomes a table row keyed by its `field`
/// attribute. The first `<tr class="header_row">` becomes the header; when
/// it is missing the table has no header and layout detection fails later.
/// Cell texts are kept verbatim, numeric coercion happens in the engine.
pub fn parse_report(html: &str) -> Result<CompanyReport> {
    let document = Html::parse_document(html);
    let td = selector("td")?;
    let field_rows = selector(&format!("tr[{FIELD_ATTR}]"))?;
    let header_row = selector(&format!("tr.{HEADER_ROW_CLASS}"))?;
    let title = selector("h1")?;

    let header = document
        .select(&header_row)
        .next()
        .map(|row| cell_texts(row, &td));

    let rows: Vec<TableRow> = document
        .select(&field_rows)
        .filter_map(|row| {
            let field = row.value().attr(FIELD_ATTR)?;
            Some(TableRow::new(field, cell_texts(row, &td)))
        })
        .collect();

    let name = document
        .select(&title)
        .next()
        .map(|h1| company_name(&text_of(h1)))
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    debug!(
        company = %name,
        rows = rows.len(),
        has_header = header.is_some(),
        "parsed report page"
    );

    Ok(CompanyReport {
        name,
        table: FinancialTable::new(header, rows),
    })
}

/// Company name from a page title such as `Сбербанк (SBER) - отчетность`.
fn company_name(title: &str) -> String {
    let name = title.split('(').next().unwrap_or(title).trim();
    if name.is_empty() {
        UNAVAILABLE.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintab_indicators::StructureError;
    use rstest::rstest;

    const PAGE: &str = r#"
        <html><body>
        <h1>Сбербанк (SBER) отчетность</h1>
        <table class="simple-little-table financials">
          <tr class="header_row">
            <td></td><td>2021</td><td>2022</td><td>2023</td><td></td><td>LTM</td>
          </tr>
          <tr field="net_income">
            <td><a href="/q/SBER/f/y/">Чистая прибыль</a></td><td>1 246</td><td>270</td><td>1 493</td>
            <td></td><td><span>1 508</span></td>
          </tr>
          <tr field="dividend"><td>Дивиденд</td><td>18.7</td><td>0</td><td>25</td></tr>
          <tr><td>no field</td><td>1</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn test_parse_rows_and_header() {
        let report = parse_report(PAGE).unwrap();
        assert_eq!(report.name, "Сбербанк");

        let header = report.table.header().unwrap();
        assert_eq!(header.len(), 6);
        assert_eq!(header[1], "2021");
        assert_eq!(header[5], "LTM");

        assert_eq!(report.table.len(), 2);
        let net_income = report.table.row("net_income").unwrap();
        assert_eq!(net_income.len(), 6);
        assert_eq!(net_income[0], "Чистая прибыль");
        assert_eq!(net_income[5], "1 508");
        assert_eq!(report.table.row("dividend").unwrap()[3], "25");
    }

    #[test]
    fn test_missing_header() {
        let report = parse_report(r#"<table><tr field="ev"><td>EV</td></tr></table>"#).unwrap();
        assert_eq!(report.table.header(), Err(StructureError::MissingHeader));
        assert_eq!(report.name, "-");
    }

    #[test]
    fn test_first_header_row_wins() {
        let page = r#"<table>
            <tr class="header_row"><td>2020</td></tr>
            <tr class="header_row"><td>1999</td><td>2000</td></tr>
        </table>"#;
        let report = parse_report(page).unwrap();
        assert_eq!(report.table.header().unwrap(), &["2020".to_string()][..]);
    }

    #[rstest]
    #[case("Газпром (GAZP)", "Газпром")]
    #[case("  Лукойл  ", "Лукойл")]
    #[case("(NONAME)", "-")]
    #[case("", "-")]
    fn test_company_name(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(company_name(title), expected);
    }
}
