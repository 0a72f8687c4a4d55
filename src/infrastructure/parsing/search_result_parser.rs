//! Search results parser
//!
//! Turns the results table of a company search page into `CompanySummary`
//! rows. Rows that cannot be read are logged and skipped; a page without a
//! results table simply yields no rows.

use scraper::{ElementRef, Selector};
use tracing::{debug, warn};

use super::config::SearchResultSelectors;
use super::dom::{compile_selectors, element_text, select_first, SourcePage, TableSelectors};
use super::links::resolve_link;
use super::{ParsingError, ParsingResult, SearchParseContext};
use crate::domain::company::{NOT_AVAILABLE, UNKNOWN};
use crate::domain::{AddressClassifier, CompanySummary, CompanyTypeClassifier};
use crate::infrastructure::config::ClassificationConfig;

/// Minimum cells a row needs: CIN, name and address
const MIN_ROW_CELLS: usize = 3;

/// Parser for company search result pages
#[derive(Debug, Clone)]
pub struct SearchResultParser {
    results_table_selectors: Vec<Selector>,
    tables: TableSelectors,
    address_classifier: AddressClassifier,
    type_classifier: CompanyTypeClassifier,
}

impl SearchResultParser {
    /// Create a new search result parser with default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&SearchResultSelectors::default(), &ClassificationConfig::default())
    }

    /// Create parser with custom selector and classification configuration
    pub fn with_config(
        selectors: &SearchResultSelectors,
        classification: &ClassificationConfig,
    ) -> ParsingResult<Self> {
        Ok(Self {
            results_table_selectors: compile_selectors(&selectors.results_table)?,
            tables: TableSelectors::new()?,
            address_classifier: classification.address_classifier()?,
            type_classifier: classification.company_type_classifier(),
        })
    }

    /// Parse raw HTML. Blank input yields no rows.
    pub fn parse(&self, html: &str, context: &SearchParseContext) -> Vec<CompanySummary> {
        if html.trim().is_empty() {
            debug!("Search page is blank, nothing to parse");
            return Vec::new();
        }

        let page = SourcePage::parse(html);
        self.parse_page(&page, context)
    }

    fn parse_page(&self, page: &SourcePage, context: &SearchParseContext) -> Vec<CompanySummary> {
        let Some(table) = select_first(page.document(), &self.results_table_selectors) else {
            debug!("No results table found");
            return Vec::new();
        };

        let rows = self.tables.body_rows(table, page.has_explicit_body(table));
        debug!(
            "Processing {} result rows{}",
            rows.len(),
            context
                .search_term
                .as_deref()
                .map(|term| format!(" for '{term}'"))
                .unwrap_or_default()
        );

        let mut summaries = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            if summaries.len() >= context.max_results {
                break;
            }

            let row_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let cells = self.tables.any_cells(row);
            if cells.len() < MIN_ROW_CELLS {
                debug!("Row {} has {} cells, skipping", row_number, cells.len());
                continue;
            }

            match self.extract_summary(&cells, row_number, context) {
                Ok(summary) => {
                    debug!("Row {}: {} ({})", row_number, summary.name, summary.cin);
                    summaries.push(summary);
                }
                Err(e) => {
                    warn!("{}", ParsingError::row_extraction_failed(row_number, &e));
                }
            }
        }

        debug!("Extracted {} companies", summaries.len());
        summaries
    }

    fn extract_summary(
        &self,
        cells: &[ElementRef<'_>],
        row_number: u32,
        context: &SearchParseContext,
    ) -> ParsingResult<CompanySummary> {
        let (cin, cin_href) = self.cell_text_and_href(cells[0]);
        let (name, name_href) = self.cell_text_and_href(cells[1]);

        if name.is_empty() {
            return Err(ParsingError::required_field_missing("name", Some("search result row")));
        }

        let detail_url = cin_href
            .and_then(|href| resolve_link(&context.base_url, href))
            .or_else(|| name_href.and_then(|href| resolve_link(&context.base_url, href)));

        let address = element_text(cells[2]);
        let address = if address.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            address
        };
        let details = self.address_classifier.classify(&address);
        let company_type = self.type_classifier.classify(Some(&cin));

        Ok(CompanySummary {
            row_number,
            name,
            cin,
            detail_url,
            address,
            city: details.city.unwrap_or_else(|| UNKNOWN.to_string()),
            state: details.state.unwrap_or_else(|| UNKNOWN.to_string()),
            state_code: details.state_code.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            pin_code: details.pin_code.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            company_type,
        })
    }

    /// Link text and href when the cell holds a link, otherwise the cell text
    fn cell_text_and_href<'a>(&self, cell: ElementRef<'a>) -> (String, Option<&'a str>) {
        match self.tables.first_link(cell) {
            Some(link) => (element_text(link), link.value().attr("href")),
            None => (element_text(cell), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompanyType;

    fn parser() -> SearchResultParser {
        SearchResultParser::new().unwrap()
    }

    fn context(max_results: usize) -> SearchParseContext {
        SearchParseContext::new("https://www.zaubacorp.com", max_results).unwrap()
    }

    #[test]
    fn parses_single_row_with_classification() {
        let html = r#"
            <table id="results">
              <thead><tr><th>CIN</th><th>Name</th><th>Address</th></tr></thead>
              <tbody>
                <tr>
                  <td><a href="/company/ACME-PVT/U12345">U12345</a></td>
                  <td>Acme Pvt</td>
                  <td>123 Street MH 400001</td>
                </tr>
              </tbody>
            </table>"#;

        let summaries = parser().parse(html, &context(10));
        assert_eq!(summaries.len(), 1);

        let acme = &summaries[0];
        assert_eq!(acme.row_number, 1);
        assert_eq!(acme.cin, "U12345");
        assert_eq!(acme.name, "Acme Pvt");
        assert_eq!(acme.company_type, CompanyType::PrivateLimited);
        assert_eq!(acme.state_code, "MH");
        assert_eq!(acme.state, "Maharashtra");
        assert_eq!(acme.pin_code, "400001");
        assert_eq!(
            acme.detail_url.as_deref(),
            Some("https://www.zaubacorp.com/company/ACME-PVT/U12345")
        );
    }

    #[test]
    fn name_link_is_used_when_cin_has_none() {
        let html = r#"
            <table>
              <tr><th>CIN</th><th>Name</th><th>Address</th></tr>
              <tr><td>L98765KA2001PLC000001</td><td><a href="/company/BETA/L98765">Beta Ltd</a></td><td></td></tr>
            </table>"#;

        let summaries = parser().parse(html, &context(10));
        assert_eq!(summaries.len(), 1);
        assert_eq!(
            summaries[0].detail_url.as_deref(),
            Some("https://www.zaubacorp.com/company/BETA/L98765")
        );
        assert_eq!(summaries[0].address, "N/A");
        assert_eq!(summaries[0].city, "Unknown");
        assert_eq!(summaries[0].pin_code, "N/A");
        assert_eq!(summaries[0].company_type, CompanyType::PublicLimited);
    }

    #[test]
    fn skips_short_and_nameless_rows() {
        let html = r#"
            <table id="results"><tbody>
              <tr><td>U1</td><td>Only two</td></tr>
              <tr><td>U22222</td><td>  </td><td>Somewhere</td></tr>
              <tr><td>U33333</td><td>Gamma</td><td>Somewhere DL 110001</td></tr>
            </tbody></table>"#;

        let summaries = parser().parse(html, &context(10));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Gamma");
        assert_eq!(summaries[0].row_number, 3);
    }

    #[test]
    fn stops_at_max_results() {
        let rows: String = (1..=5)
            .map(|i| format!("<tr><td>U{i:05}</td><td>Company {i}</td><td>Addr</td></tr>"))
            .collect();
        let html = format!("<table id=\"results\"><tbody>{rows}</tbody></table>");

        assert_eq!(parser().parse(&html, &context(3)).len(), 3);
        assert_eq!(parser().parse(&html, &context(50)).len(), 5);
        assert!(parser().parse(&html, &context(0)).is_empty());
    }

    #[test]
    fn blank_or_tableless_pages_yield_nothing() {
        assert!(parser().parse("", &context(10)).is_empty());
        assert!(parser().parse("  \n ", &context(10)).is_empty());
        assert!(parser().parse("<p>No results</p>", &context(10)).is_empty());
    }

    #[test]
    fn td_header_row_is_dropped_without_tbody() {
        let html = r#"
            <table id="results">
              <tr><td>CIN</td><td>Company Name</td><td>Address</td></tr>
              <tr><td>F00012</td><td>Delta Overseas</td><td>Somewhere KA 560001</td></tr>
            </table>"#;

        let summaries = parser().parse(html, &context(10));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Delta Overseas");
        assert_eq!(summaries[0].row_number, 1);
        assert_eq!(summaries[0].company_type, CompanyType::ForeignCompany);
    }
}
