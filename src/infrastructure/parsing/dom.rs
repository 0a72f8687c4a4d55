//! Selector compilation and table-walking helpers shared by both parsers

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::{ParsingError, ParsingResult};
use crate::domain::text::collapse_whitespace;

/// Compile a single selector string
pub fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))
}

/// Compile multiple selector strings into Selector objects
///
/// Individual failures are logged and skipped; the call only fails when no
/// selector at all could be compiled.
pub fn compile_selectors(selector_strings: &[String]) -> ParsingResult<Vec<Selector>> {
    let mut selectors = Vec::new();
    let mut errors = Vec::new();

    for selector_str in selector_strings {
        match Selector::parse(selector_str) {
            Ok(selector) => selectors.push(selector),
            Err(e) => {
                warn!("Failed to compile selector '{}': {}", selector_str, e);
                errors.push(format!("'{selector_str}': {e}"));
            }
        }
    }

    if selectors.is_empty() {
        let reason = if errors.is_empty() {
            "no selectors configured".to_string()
        } else {
            errors.join(", ")
        };
        return Err(ParsingError::invalid_selector(&selector_strings.join(", "), reason));
    }

    if !errors.is_empty() {
        debug!("Some selectors failed to compile: {}", errors.join(", "));
    }

    Ok(selectors)
}

/// First element matched by the first selector that matches anything
pub fn select_first<'a>(html: &'a Html, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|selector| html.select(selector).next())
}

/// Whitespace-normalized text content of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Non-empty text of the first element matched by any selector
pub fn first_text(html: &Html, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|selector| html.select(selector).next())
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// Markup that never produces elements
static INERT_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>").unwrap());

/// Opening and closing `table` and `tbody` tags
static TABLE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(/?)(table|tbody)\b").unwrap());

/// A parsed page that still knows which tables were written with a `tbody`.
///
/// The HTML parser inserts a `tbody` into every table, so the distinction
/// only survives in the source text.
#[derive(Debug)]
pub struct SourcePage {
    document: Html,
    explicit_bodies: Option<Vec<bool>>,
}

impl SourcePage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let bodies = scan_explicit_bodies(html);
        let table_count = document_tables(&document).count();

        let explicit_bodies = if bodies.len() == table_count {
            Some(bodies)
        } else {
            debug!(
                "Source has {} table tags but the document has {} tables",
                bodies.len(),
                table_count
            );
            None
        };

        Self {
            document,
            explicit_bodies,
        }
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Whether the source of `table` carried its own `tbody`. Tables that
    /// cannot be matched back to the source count as explicit.
    pub fn has_explicit_body(&self, table: ElementRef<'_>) -> bool {
        let Some(bodies) = &self.explicit_bodies else {
            return true;
        };
        document_tables(&self.document)
            .position(|candidate| candidate.id() == table.id())
            .and_then(|index| bodies.get(index).copied())
            .unwrap_or(true)
    }
}

fn document_tables(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "table")
}

/// One flag per `table` start tag, in source order
fn scan_explicit_bodies(html: &str) -> Vec<bool> {
    let markup = INERT_MARKUP.replace_all(html, "");
    let mut bodies = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    for tag in TABLE_TAG.captures_iter(&markup) {
        let closing = !tag[1].is_empty();
        let is_table = tag[2].eq_ignore_ascii_case("table");
        match (closing, is_table) {
            (false, true) => {
                open.push(bodies.len());
                bodies.push(false);
            }
            (false, false) => {
                if let Some(&index) = open.last() {
                    bodies[index] = true;
                }
            }
            (true, true) => {
                open.pop();
            }
            (true, false) => {}
        }
    }

    bodies
}

/// Fixed selectors used to walk tables
#[derive(Debug, Clone)]
pub struct TableSelectors {
    row: Selector,
    body_row: Selector,
    data_cell: Selector,
    any_cell: Selector,
    link: Selector,
    caption: Selector,
    span: Selector,
}

impl TableSelectors {
    pub fn new() -> ParsingResult<Self> {
        Ok(Self {
            row: compile_selector("tr")?,
            body_row: compile_selector("tbody > tr")?,
            data_cell: compile_selector("td")?,
            any_cell: compile_selector("td, th")?,
            link: compile_selector("a")?,
            caption: compile_selector("caption")?,
            span: compile_selector("span")?,
        })
    }

    /// Data rows of a table.
    ///
    /// With an explicit body these are the `tbody` rows, minus a leading
    /// row made only of `th` cells. Without one the first `tr` is the
    /// header and is always dropped.
    pub fn body_rows<'a>(&self, table: ElementRef<'a>, explicit_body: bool) -> Vec<ElementRef<'a>> {
        if !explicit_body {
            return self.all_rows(table).into_iter().skip(1).collect();
        }

        let mut rows: Vec<ElementRef<'a>> = table.select(&self.body_row).collect();
        if rows.first().is_some_and(|row| row.select(&self.data_cell).next().is_none()) {
            rows.remove(0);
        }
        rows
    }

    /// Every `tr` of the table, header rows included
    pub fn all_rows<'a>(&self, table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        table.select(&self.row).collect()
    }

    pub fn data_cells<'a>(&self, row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        row.select(&self.data_cell).collect()
    }

    pub fn any_cells<'a>(&self, row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        row.select(&self.any_cell).collect()
    }

    pub fn first_link<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.select(&self.link).next()
    }

    pub fn first_href<'a>(&self, element: ElementRef<'a>) -> Option<&'a str> {
        self.first_link(element).and_then(|link| link.value().attr("href"))
    }

    pub fn caption_text(&self, table: ElementRef<'_>) -> Option<String> {
        table.select(&self.caption).next().map(element_text)
    }

    pub fn spans<'a>(&self, element: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        element.select(&self.span).collect()
    }
}

/// Text of the next sibling element with the same tag name
pub fn next_sibling_text(element: ElementRef<'_>) -> Option<String> {
    let tag = element.value().name();
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == tag)
        .map(element_text)
}
