//! Infrastructure layer for page fetching, parsing, configuration and export
//!
//! This module provides HTML parsing of registry pages, the HTTP page
//! fetcher, configuration loading, logging setup and file export.

pub mod config; // Configuration loading and defaults
pub mod export; // JSON / CSV export
pub mod logging; // Logging infrastructure
pub mod page_fetcher; // HTTP and in-memory page sources
pub mod parsing; // Search and detail page parsers
pub mod parsing_error; // Parsing error types

// Re-export commonly used items
pub use config::{AppConfig, ConfigError, ConfigManager};
pub use export::{export_detail, export_portfolio, export_summaries, ExportError, ExportedFiles};
pub use logging::{get_log_directory, init_logging_with_config, LoggingGuard};
pub use page_fetcher::{FetchError, FetcherConfig, HttpPageFetcher, PageFetcher, StaticPageFetcher};
pub use parsing::{
    CompanyDetailParser, DetailParseContext, ParsingConfig, SearchParseContext, SearchResultParser,
};
pub use parsing_error::{ParsingError, ParsingResult};
