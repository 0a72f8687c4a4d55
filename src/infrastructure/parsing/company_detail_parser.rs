//! Company detail page parser
//!
//! Runs every section extractor over the page and assembles a
//! `CompanyDetail`. Only blank input is an error; sections that are not on
//! the page leave their fields empty.

use tracing::{debug, info};

use super::config::ParsingConfig;
use super::sections::{
    ChargesSection, ContactSection, DirectorsSection, HeaderSection, KeyValueTableSection, SectionExtractor,
    SimilarCompaniesSection,
};
use super::dom::SourcePage;
use super::{DetailParseContext, ParsingError, ParsingResult};
use crate::domain::CompanyDetail;

/// Parser for company detail pages
#[derive(Debug, Clone)]
pub struct CompanyDetailParser {
    header: HeaderSection,
    basic_info: KeyValueTableSection,
    directors: DirectorsSection,
    contact: ContactSection,
    charges: ChargesSection,
    similar_companies: SimilarCompaniesSection,
    financial: KeyValueTableSection,
}

impl CompanyDetailParser {
    /// Create a new detail parser with default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    /// Create parser with custom configuration
    pub fn with_config(config: &ParsingConfig) -> ParsingResult<Self> {
        let selectors = &config.detail_selectors;
        Ok(Self {
            header: HeaderSection::new(selectors)?,
            basic_info: KeyValueTableSection::basic_info(selectors)?,
            directors: DirectorsSection::new(selectors)?,
            contact: ContactSection::new(config)?,
            charges: ChargesSection::new(selectors)?,
            similar_companies: SimilarCompaniesSection::new(config)?,
            financial: KeyValueTableSection::financial(selectors)?,
        })
    }

    /// Parse raw HTML of a detail page
    pub fn parse(&self, html: &str, context: &DetailParseContext) -> ParsingResult<CompanyDetail> {
        if html.trim().is_empty() {
            return Err(ParsingError::EmptyDocument {
                url: context.url.clone(),
            });
        }

        let page = SourcePage::parse(html);
        if page.document().root_element().text().all(|text| text.trim().is_empty()) {
            debug!("No text on {}, nothing to extract", context.describe());
            return Ok(CompanyDetail::default());
        }

        debug!("Parsing company detail page {}", context.describe());

        let header = Self::run(&self.header, &page, context).unwrap_or_default();
        let detail = CompanyDetail {
            company_name: header.company_name,
            last_updated: header.last_updated,
            description: header.description,
            basic_info: Self::run(&self.basic_info, &page, context).unwrap_or_default(),
            directors: Self::run(&self.directors, &page, context).unwrap_or_default(),
            contact_info: Self::run(&self.contact, &page, context).unwrap_or_default(),
            financial_info: Self::run(&self.financial, &page, context).unwrap_or_default(),
            charges: Self::run(&self.charges, &page, context).unwrap_or_default(),
            similar_companies: Self::run(&self.similar_companies, &page, context).unwrap_or_default(),
        };

        info!(
            "Parsed {}: {} basic fields, {} directors, {} charges, {} similar companies",
            detail.display_name().unwrap_or("company"),
            detail.basic_info.len(),
            detail.directors.len(),
            detail.charges.len(),
            detail.similar_companies.len()
        );

        Ok(detail)
    }

    fn run<E: SectionExtractor>(extractor: &E, page: &SourcePage, context: &DetailParseContext) -> Option<E::Output> {
        let output = extractor.extract(page, context).into_option();
        if output.is_none() {
            debug!("Section '{}' not present on {}", extractor.section(), context.describe());
        }
        output
    }
}
