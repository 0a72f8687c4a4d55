//! Application layer module
//!
//! This module contains the lookup use case and the console presentation
//! that orchestrate the parsers and the page fetcher.

pub mod company_lookup;
pub mod presentation;

pub use company_lookup::{BatchDetails, CompanyLookupService, SearchHit};
pub use presentation::{render_detail_report, render_portfolio_report, render_summary_table};
