//! HTML parsing infrastructure for registry pages
//!
//! Trait-based parsers over `scraper::Html` with configurable selector
//! fallbacks. Missing page sections are reported as `Section::Missing` and
//! never abort a parse.

pub mod company_detail_parser;
pub mod config;
pub mod context;
pub mod dom;
pub mod links;
pub mod search_result_parser;
pub mod sections;

// Re-export public types
pub use super::parsing_error::{ParsingError, ParsingResult};
pub use company_detail_parser::CompanyDetailParser;
pub use config::{CompanyDetailSelectors, ParsingConfig, SearchResultSelectors};
pub use context::{DetailParseContext, SearchParseContext};
pub use dom::SourcePage;
pub use links::resolve_link;
pub use search_result_parser::SearchResultParser;
pub use sections::{Section, SectionExtractor};
