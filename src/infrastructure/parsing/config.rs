//! Parsing configuration for HTML extraction
//!
//! Centralized configuration for CSS selectors and parsing behavior.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Search results page selectors
    pub search_selectors: SearchResultSelectors,

    /// Company detail page selectors
    pub detail_selectors: CompanyDetailSelectors,

    /// Rows read from the similar-address table
    pub max_similar_companies: usize,

    /// Decode Cloudflare-obfuscated e-mail addresses instead of reporting a placeholder
    pub decode_protected_email: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            search_selectors: SearchResultSelectors::default(),
            detail_selectors: CompanyDetailSelectors::default(),
            max_similar_companies: 10,
            decode_protected_email: false,
        }
    }
}

/// CSS selectors for search result pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultSelectors {
    /// Selectors for the results table - first match wins
    pub results_table: Vec<String>,
}

impl Default for SearchResultSelectors {
    fn default() -> Self {
        Self {
            results_table: vec!["table#results".to_string(), "table".to_string()],
        }
    }
}

/// CSS selectors and marker texts for company detail pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetailSelectors {
    /// Page header
    pub title: Vec<String>,
    pub last_updated: Vec<String>,
    pub description: Vec<String>,

    /// Label/value tables
    pub basic_info_table: String,
    pub financial_table: String,

    /// Directors table and the caption text that identifies it
    pub directors_table: String,
    pub directors_caption: String,

    /// Contact block
    pub contact_section: String,
    pub protected_email: String,
    pub protected_email_attribute: String,
    pub protected_email_placeholder: String,
    pub address_label: String,
    pub website_label: String,

    /// Section tables
    pub charges_table: String,
    pub similar_companies_table: String,

    /// Marker rendered in place of values hidden behind a login
    pub lock_marker: String,
}

impl Default for CompanyDetailSelectors {
    fn default() -> Self {
        Self {
            title: vec!["h1#title".to_string(), "h1".to_string()],
            last_updated: vec!["span#last_updated".to_string()],
            description: vec!["p#about".to_string()],
            basic_info_table: r#"table[class="table table-striped"]"#.to_string(),
            financial_table: r#"table[class="table table-striped table-hover"]"#.to_string(),
            directors_table: "table.table-striped".to_string(),
            directors_caption: "Current Directors".to_string(),
            contact_section: "div#contact-details-content".to_string(),
            protected_email: "a.__cf_email__".to_string(),
            protected_email_attribute: "data-cfemail".to_string(),
            protected_email_placeholder: "Protected Email".to_string(),
            address_label: "Address:".to_string(),
            website_label: "Website:".to_string(),
            charges_table: "div#charges-content table".to_string(),
            similar_companies_table: "div#similar-address-content table".to_string(),
            lock_marker: "i.lock".to_string(),
        }
    }
}
