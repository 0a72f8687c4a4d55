//! Parsing error types for registry pages
//!
//! Missing page sections are not errors (they come back as `Section::Missing`);
//! these variants cover construction problems, rows that cannot be read, and
//! blank input.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Document is empty{}", .url.as_deref().map(|u| format!(": {u}")).unwrap_or_default())]
    EmptyDocument { url: Option<String> },

    #[error("Required field '{field}' not found in HTML")]
    RequiredFieldMissing {
        field: String,
        context: Option<String>,
    },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid pattern: {pattern} - {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid base URL: {url} - {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Row {row} could not be extracted: {reason}")]
    RowExtractionFailed { row: u32, reason: String },
}

impl ParsingError {
    /// Create a required field missing error with context
    pub fn required_field_missing(field: &str, context: Option<&str>) -> Self {
        Self::RequiredFieldMissing {
            field: field.to_string(),
            context: context.map(str::to_string),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_base_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn row_extraction_failed(row: u32, error: &Self) -> Self {
        Self::RowExtractionFailed {
            row,
            reason: error.to_string(),
        }
    }
}

impl From<regex::Error> for ParsingError {
    fn from(error: regex::Error) -> Self {
        match error {
            regex::Error::Syntax(pattern) => Self::InvalidPattern {
                reason: "syntax error".to_string(),
                pattern,
            },
            other => Self::InvalidPattern {
                pattern: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
