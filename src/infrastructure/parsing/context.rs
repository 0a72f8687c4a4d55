//! Parsing context for registry pages
//!
//! Contexts carry what a parse needs besides the HTML itself: the base URL
//! that relative links resolve against and, for search pages, the row limit.

use url::Url;

use super::{ParsingError, ParsingResult};

/// Context for parsing a search results page
#[derive(Debug, Clone)]
pub struct SearchParseContext {
    /// Base URL for resolving relative links
    pub base_url: Url,

    /// Maximum number of summaries to return
    pub max_results: usize,

    /// Search term that produced the page, for logging
    pub search_term: Option<String>,
}

impl SearchParseContext {
    pub fn new(base_url: &str, max_results: usize) -> ParsingResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            max_results,
            search_term: None,
        })
    }

    pub fn with_search_term(mut self, term: &str) -> Self {
        self.search_term = Some(term.to_string());
        self
    }
}

/// Context for parsing a company detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Page URL being parsed, when known
    pub url: Option<String>,

    /// Base URL for resolving relative links
    pub base_url: Url,
}

impl DetailParseContext {
    pub fn new(base_url: &str) -> ParsingResult<Self> {
        Ok(Self {
            url: None,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn describe(&self) -> &str {
        self.url.as_deref().unwrap_or("<inline document>")
    }
}

fn parse_base_url(base_url: &str) -> ParsingResult<Url> {
    let url = Url::parse(base_url).map_err(|e| ParsingError::invalid_base_url(base_url, e))?;
    if url.cannot_be_a_base() {
        return Err(ParsingError::invalid_base_url(base_url, "URL cannot be used as a base"));
    }
    Ok(url)
}
