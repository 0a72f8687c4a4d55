use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::amount::parse_amount_in_rupees;
use super::company_type::CompanyType;
use super::text::non_placeholder;

/// Insertion-ordered key/value pairs scraped from label/value tables.
pub type FieldMap = IndexMap<String, String>;

/// Default for city/state when the address gives nothing away.
pub const UNKNOWN: &str = "Unknown";

/// Default for identifiers, codes and addresses that are not available.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of a search-results table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub row_number: u32,
    pub name: String,
    pub cin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub state_code: String,
    pub pin_code: String,
    pub company_type: CompanyType,
}

/// Director listed under "Current Directors"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorRecord {
    pub din: String,
    pub name: String,
    pub designation: String,
    pub appointment_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
}

/// Registered charge (lien) against the company's assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRecord {
    pub charge_id: String,
    pub creation_date: String,
    pub modification_date: String,
    pub closure_date: String,
    pub assets_under_charge: String,
    pub amount: String,
    pub charge_holder: String,
}

impl ChargeRecord {
    /// A charge without a closure date is still open.
    pub fn is_open(&self) -> bool {
        non_placeholder(&self.closure_date).is_none()
    }

    pub fn amount_in_rupees(&self) -> Option<f64> {
        parse_amount_in_rupees(&self.amount)
    }
}

/// Another company registered at the same address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarCompanyRecord {
    pub name: String,
    pub cin: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_url: Option<String>,
}

/// Everything extracted from a company detail page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub basic_info: FieldMap,
    #[serde(default)]
    pub directors: Vec<DirectorRecord>,
    #[serde(default)]
    pub contact_info: FieldMap,
    #[serde(default)]
    pub financial_info: FieldMap,
    #[serde(default)]
    pub charges: Vec<ChargeRecord>,
    #[serde(default)]
    pub similar_companies: Vec<SimilarCompanyRecord>,
}

impl CompanyDetail {
    /// Page title, falling back to the "Company Name" row of the basic info table.
    pub fn display_name(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .or_else(|| self.basic_info.get("Company Name").map(String::as_str))
    }

    /// True when no section of the page yielded anything.
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.last_updated.is_none()
            && self.description.is_none()
            && self.basic_info.is_empty()
            && self.directors.is_empty()
            && self.contact_info.is_empty()
            && self.financial_info.is_empty()
            && self.charges.is_empty()
            && self.similar_companies.is_empty()
    }

    pub fn open_charges(&self) -> impl Iterator<Item = &ChargeRecord> {
        self.charges.iter().filter(|charge| charge.is_open())
    }

    /// Sum of the amounts that could be read, in rupees.
    pub fn total_charge_amount(&self) -> Option<f64> {
        let amounts: Vec<f64> = self.charges.iter().filter_map(ChargeRecord::amount_in_rupees).collect();
        if amounts.is_empty() {
            None
        } else {
            Some(amounts.iter().sum())
        }
    }
}
