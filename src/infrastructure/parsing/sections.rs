//! Independent extractors for the sections of a company detail page
//!
//! Each extractor owns its compiled selectors and reports either the data it
//! found or `Section::Missing` when the page does not carry that section.
//! Extractors never fail once built.

use scraper::{ElementRef, Selector};

use super::config::{CompanyDetailSelectors, ParsingConfig};
use super::dom::{
    compile_selector, compile_selectors, element_text, first_text, next_sibling_text, SourcePage,
    TableSelectors,
};
use super::links::resolve_link;
use super::{DetailParseContext, ParsingResult};
use crate::domain::{ChargeRecord, DirectorRecord, FieldMap, SimilarCompanyRecord};

/// Outcome of looking for one section of a page
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Found(T),
    Missing,
}

impl<T> Section<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing => None,
        }
    }
}

/// A single section of a company detail page
pub trait SectionExtractor {
    type Output;

    /// Section name used in logs
    fn section(&self) -> &'static str;

    fn extract(&self, page: &SourcePage, context: &DetailParseContext) -> Section<Self::Output>;
}

/// Title block at the top of the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeader {
    pub company_name: Option<String>,
    pub last_updated: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HeaderSection {
    title: Vec<Selector>,
    last_updated: Vec<Selector>,
    description: Vec<Selector>,
}

impl HeaderSection {
    pub fn new(selectors: &CompanyDetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            title: compile_selectors(&selectors.title)?,
            last_updated: compile_selectors(&selectors.last_updated)?,
            description: compile_selectors(&selectors.description)?,
        })
    }
}

impl SectionExtractor for HeaderSection {
    type Output = PageHeader;

    fn section(&self) -> &'static str {
        "header"
    }

    fn extract(&self, page: &SourcePage, _context: &DetailParseContext) -> Section<PageHeader> {
        let html = page.document();
        let header = PageHeader {
            company_name: first_text(html, &self.title),
            last_updated: first_text(html, &self.last_updated),
            description: first_text(html, &self.description),
        };

        if header == PageHeader::default() {
            Section::Missing
        } else {
            Section::Found(header)
        }
    }
}

/// Rows of two-column label/value tables, keyed by the label
#[derive(Debug, Clone)]
pub struct KeyValueTableSection {
    name: &'static str,
    table: Selector,
    lock: Option<Selector>,
    tables: TableSelectors,
}

impl KeyValueTableSection {
    /// "Company Details" style tables; every non-empty label is kept.
    pub fn basic_info(selectors: &CompanyDetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            name: "basic info",
            table: compile_selector(&selectors.basic_info_table)?,
            lock: None,
            tables: TableSelectors::new()?,
        })
    }

    /// Key-number tables; locked or empty values are dropped.
    pub fn financial(selectors: &CompanyDetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            name: "financial info",
            table: compile_selector(&selectors.financial_table)?,
            lock: Some(compile_selector(&selectors.lock_marker)?),
            tables: TableSelectors::new()?,
        })
    }
}

impl SectionExtractor for KeyValueTableSection {
    type Output = FieldMap;

    fn section(&self) -> &'static str {
        self.name
    }

    fn extract(&self, page: &SourcePage, _context: &DetailParseContext) -> Section<FieldMap> {
        let mut found_table = false;
        let mut fields = FieldMap::new();

        for table in page.document().select(&self.table) {
            found_table = true;
            for row in self.tables.all_rows(table) {
                let cells = self.tables.data_cells(row);
                let [key_cell, value_cell, ..] = cells.as_slice() else {
                    continue;
                };

                if self.lock.as_ref().is_some_and(|lock| has_marker(*value_cell, lock)) {
                    continue;
                }

                let key = element_text(*key_cell);
                let value = element_text(*value_cell);
                if key.is_empty() || (self.lock.is_some() && value.is_empty()) {
                    continue;
                }
                fields.insert(key, value);
            }
        }

        if found_table {
            Section::Found(fields)
        } else {
            Section::Missing
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectorsSection {
    table: Selector,
    caption: String,
    tables: TableSelectors,
}

impl DirectorsSection {
    pub fn new(selectors: &CompanyDetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            table: compile_selector(&selectors.directors_table)?,
            caption: selectors.directors_caption.clone(),
            tables: TableSelectors::new()?,
        })
    }

    fn director_from_row(&self, cells: &[ElementRef<'_>], context: &DetailParseContext) -> DirectorRecord {
        let detail_url = self
            .tables
            .first_href(cells[1])
            .and_then(|href| resolve_link(&context.base_url, href))
            .or_else(|| {
                self.tables
                    .first_href(cells[0])
                    .and_then(|href| resolve_link(&context.base_url, href))
            });

        DirectorRecord {
            din: element_text(cells[0]),
            name: element_text(cells[1]),
            designation: element_text(cells[2]),
            appointment_date: element_text(cells[3]),
            detail_url,
        }
    }
}

impl SectionExtractor for DirectorsSection {
    type Output = Vec<DirectorRecord>;

    fn section(&self) -> &'static str {
        "directors"
    }

    fn extract(&self, page: &SourcePage, context: &DetailParseContext) -> Section<Vec<DirectorRecord>> {
        let mut found_table = false;
        let mut directors = Vec::new();

        let captioned = page.document().select(&self.table).filter(|table| {
            self.tables
                .caption_text(*table)
                .is_some_and(|caption| caption.contains(&self.caption))
        });

        for table in captioned {
            found_table = true;
            for row in self.tables.body_rows(table, page.has_explicit_body(table)) {
                let cells = self.tables.data_cells(row);
                if cells.len() >= 4 {
                    directors.push(self.director_from_row(&cells, context));
                }
            }
        }

        if found_table {
            Section::Found(directors)
        } else {
            Section::Missing
        }
    }
}

pub const EMAIL_KEY: &str = "email";
pub const ADDRESS_KEY: &str = "address";
pub const WEBSITE_KEY: &str = "website";

#[derive(Debug, Clone)]
pub struct ContactSection {
    container: Selector,
    email: Selector,
    email_attribute: String,
    email_placeholder: String,
    address_label: String,
    website_label: String,
    decode_protected_email: bool,
    tables: TableSelectors,
}

impl ContactSection {
    pub fn new(config: &ParsingConfig) -> ParsingResult<Self> {
        let selectors = &config.detail_selectors;
        Ok(Self {
            container: compile_selector(&selectors.contact_section)?,
            email: compile_selector(&selectors.protected_email)?,
            email_attribute: selectors.protected_email_attribute.clone(),
            email_placeholder: selectors.protected_email_placeholder.clone(),
            address_label: selectors.address_label.clone(),
            website_label: selectors.website_label.clone(),
            decode_protected_email: config.decode_protected_email,
            tables: TableSelectors::new()?,
        })
    }

    fn email(&self, link: ElementRef<'_>) -> String {
        let visible = element_text(link);
        if looks_like_email(&visible) {
            return visible;
        }

        if self.decode_protected_email {
            if let Some(decoded) = link.value().attr(&self.email_attribute).and_then(decode_protected_email) {
                return decoded;
            }
        }

        self.email_placeholder.clone()
    }

    /// Text after `label` in the span, or the next span's text when the
    /// label stands alone.
    fn labelled_value(span: ElementRef<'_>, text: &str, label: &str) -> Option<String> {
        let (_, remainder) = text.split_once(label)?;
        let remainder = remainder.trim();
        if remainder.is_empty() {
            next_sibling_text(span).filter(|value| !value.is_empty())
        } else {
            Some(remainder.to_string())
        }
    }
}

impl SectionExtractor for ContactSection {
    type Output = FieldMap;

    fn section(&self) -> &'static str {
        "contact info"
    }

    fn extract(&self, page: &SourcePage, _context: &DetailParseContext) -> Section<FieldMap> {
        let Some(container) = page.document().select(&self.container).next() else {
            return Section::Missing;
        };

        let mut contact = FieldMap::new();
        if let Some(link) = container.select(&self.email).next() {
            contact.insert(EMAIL_KEY.to_string(), self.email(link));
        }

        for span in self.tables.spans(container) {
            let text = element_text(span);
            if text.contains(&self.address_label) {
                if let Some(address) = Self::labelled_value(span, &text, &self.address_label) {
                    contact.entry(ADDRESS_KEY.to_string()).or_insert(address);
                }
            } else if text.contains(&self.website_label) {
                if let Some(website) = Self::labelled_value(span, &text, &self.website_label) {
                    contact.entry(WEBSITE_KEY.to_string()).or_insert(website);
                }
            }
        }

        Section::Found(contact)
    }
}

#[derive(Debug, Clone)]
pub struct ChargesSection {
    table: Selector,
    lock: Selector,
    tables: TableSelectors,
}

impl ChargesSection {
    pub fn new(selectors: &CompanyDetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            table: compile_selector(&selectors.charges_table)?,
            lock: compile_selector(&selectors.lock_marker)?,
            tables: TableSelectors::new()?,
        })
    }
}

impl SectionExtractor for ChargesSection {
    type Output = Vec<ChargeRecord>;

    fn section(&self) -> &'static str {
        "charges"
    }

    fn extract(&self, page: &SourcePage, _context: &DetailParseContext) -> Section<Vec<ChargeRecord>> {
        let Some(table) = page.document().select(&self.table).next() else {
            return Section::Missing;
        };

        let charges = self
            .tables
            .body_rows(table, page.has_explicit_body(table))
            .into_iter()
            .map(|row| self.tables.data_cells(row))
            .filter(|cells| cells.len() >= 7)
            .filter(|cells| !has_marker(cells[0], &self.lock) && !has_marker(cells[1], &self.lock))
            .map(|cells| ChargeRecord {
                charge_id: element_text(cells[0]),
                creation_date: element_text(cells[1]),
                modification_date: element_text(cells[2]),
                closure_date: element_text(cells[3]),
                assets_under_charge: element_text(cells[4]),
                amount: element_text(cells[5]),
                charge_holder: element_text(cells[6]),
            })
            .collect();

        Section::Found(charges)
    }
}

#[derive(Debug, Clone)]
pub struct SimilarCompaniesSection {
    table: Selector,
    max_rows: usize,
    tables: TableSelectors,
}

impl SimilarCompaniesSection {
    pub fn new(config: &ParsingConfig) -> ParsingResult<Self> {
        Ok(Self {
            table: compile_selector(&config.detail_selectors.similar_companies_table)?,
            max_rows: config.max_similar_companies,
            tables: TableSelectors::new()?,
        })
    }
}

impl SectionExtractor for SimilarCompaniesSection {
    type Output = Vec<SimilarCompanyRecord>;

    fn section(&self) -> &'static str {
        "similar companies"
    }

    fn extract(&self, page: &SourcePage, context: &DetailParseContext) -> Section<Vec<SimilarCompanyRecord>> {
        let Some(table) = page.document().select(&self.table).next() else {
            return Section::Missing;
        };

        let link_of = |cell: ElementRef<'_>| {
            self.tables
                .first_href(cell)
                .and_then(|href| resolve_link(&context.base_url, href))
        };

        let companies = self
            .tables
            .body_rows(table, page.has_explicit_body(table))
            .into_iter()
            .take(self.max_rows)
            .map(|row| self.tables.data_cells(row))
            .filter(|cells| cells.len() >= 3)
            .map(|cells| SimilarCompanyRecord {
                cin: element_text(cells[0]),
                name: element_text(cells[1]),
                address: element_text(cells[2]),
                cin_url: link_of(cells[0]),
                name_url: link_of(cells[1]),
            })
            .collect();

        Section::Found(companies)
    }
}

fn has_marker(cell: ElementRef<'_>, marker: &Selector) -> bool {
    cell.select(marker).next().is_some()
}

fn looks_like_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !text.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Decode a Cloudflare `data-cfemail` value: hex bytes, the first being the
/// XOR key for the rest.
pub fn decode_protected_email(encoded: &str) -> Option<String> {
    let encoded = encoded.trim();
    if encoded.len() < 4 || encoded.len() % 2 != 0 || !encoded.is_ascii() {
        return None;
    }

    let bytes = (0..encoded.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&encoded[i..i + 2], 16).ok())
        .collect::<Option<Vec<u8>>>()?;
    let (key, payload) = bytes.split_first()?;
    let decoded: Vec<u8> = payload.iter().map(|byte| byte ^ key).collect();

    String::from_utf8(decoded).ok().filter(|email| looks_like_email(email))
}
