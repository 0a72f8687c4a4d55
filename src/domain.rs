//! Domain module - company records and the text heuristics behind them
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod address;
pub mod amount;
pub mod company;
pub mod company_type;
pub mod portfolio;
pub mod text;

// Re-export commonly used items for convenience
pub use address::{AddressClassifier, AddressDetails, StateCode};
pub use company::{
    ChargeRecord, CompanyDetail, CompanySummary, DirectorRecord, FieldMap, SimilarCompanyRecord,
};
pub use company_type::{CompanyType, CompanyTypeClassifier};
pub use portfolio::{CompanyProfile, PortfolioSummary, Stats};
pub use text::{collapse_whitespace, safe_truncate, safe_truncate_str};
