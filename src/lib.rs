//! Company registry scraper
//!
//! Extracts structured company records (identifiers, directors, charges,
//! financials, similar entities) from registry search and detail pages.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
