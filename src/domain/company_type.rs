//! Coarse company-type classification from the CIN prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Company category derived from the registration identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompanyType {
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
    #[serde(rename = "Private Limited")]
    PrivateLimited,
    #[serde(rename = "Public Limited")]
    PublicLimited,
    #[serde(rename = "LLP")]
    Llp,
    #[serde(rename = "Foreign Company")]
    ForeignCompany,
    #[serde(rename = "Other")]
    Other,
}

impl CompanyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::PrivateLimited => "Private Limited",
            Self::PublicLimited => "Public Limited",
            Self::Llp => "LLP",
            Self::ForeignCompany => "Foreign Company",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Prefixes that mark an LLP identification number. Not known to be exhaustive,
/// which is why the classifier takes the list from configuration.
pub const DEFAULT_LLP_PREFIXES: &[&str] = &["AAA", "AAB", "AAC"];

/// Identifiers shorter than this are too short to inspect.
pub const DEFAULT_MIN_CIN_LENGTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyTypeClassifier {
    llp_prefixes: Vec<String>,
    min_length: usize,
}

impl Default for CompanyTypeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_LLP_PREFIXES.iter().copied(), DEFAULT_MIN_CIN_LENGTH)
    }
}

impl CompanyTypeClassifier {
    pub fn new<I, S>(llp_prefixes: I, min_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            llp_prefixes: llp_prefixes
                .into_iter()
                .map(|prefix| prefix.as_ref().trim().to_uppercase())
                .filter(|prefix| !prefix.is_empty())
                .collect(),
            min_length,
        }
    }

    pub fn llp_prefixes(&self) -> &[String] {
        &self.llp_prefixes
    }

    pub fn classify(&self, cin: Option<&str>) -> CompanyType {
        let Some(cin) = cin.map(str::trim) else {
            return CompanyType::Unknown;
        };
        if cin.chars().count() < self.min_length {
            return CompanyType::Unknown;
        }

        let cin = cin.to_uppercase();
        if cin.starts_with('U') {
            CompanyType::PrivateLimited
        } else if cin.starts_with('L') {
            CompanyType::PublicLimited
        } else if self.llp_prefixes.iter().any(|prefix| cin.starts_with(prefix.as_str())) {
            CompanyType::Llp
        } else if cin.starts_with('F') {
            CompanyType::ForeignCompany
        } else {
            CompanyType::Other
        }
    }
}
