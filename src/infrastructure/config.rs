//! Configuration infrastructure
//!
//! Contains configuration loading and management for the registry scraper.
//!
//! Configuration is layered:
//! 1. Built-in defaults (`defaults` module)
//! 2. Optional configuration file (JSON, TOML or YAML)
//! 3. `CORP_REGISTRY_*` environment variables, `__` separating nested keys
//!    (e.g. `CORP_REGISTRY_FETCHER__TIMEOUT_SECONDS=10`)

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::info;
use url::Url;

use crate::domain::address::{default_state_codes, AddressClassifier, StateCode};
use crate::domain::company_type::{CompanyTypeClassifier, DEFAULT_LLP_PREFIXES, DEFAULT_MIN_CIN_LENGTH};
use crate::infrastructure::page_fetcher::FetcherConfig;
use crate::infrastructure::parsing::ParsingConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

impl ConfigError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registry site location and search defaults
    pub site: SiteConfig,

    /// HTTP fetcher behavior
    pub fetcher: FetcherConfig,

    /// Selectors and parsing switches
    pub parsing: ParsingConfig,

    /// Lookup tables for address and company-type heuristics
    pub classification: ClassificationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Export destination
    pub export: ExportConfig,
}

/// Registry site settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL every relative link resolves against
    pub base_url: String,

    /// Path segment under which search results live
    pub search_path: String,

    /// Default number of search results to keep
    pub max_results: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            search_path: defaults::SEARCH_PATH.to_string(),
            max_results: defaults::MAX_RESULTS,
        }
    }
}

impl SiteConfig {
    pub fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::validation(format!("invalid base_url '{}': {}", self.base_url, e)))
    }

    /// Search URL for a company name: the name is trimmed, uppercased and
    /// percent-encoded as a single path segment.
    pub fn search_url(&self, company_name: &str) -> Result<String, ConfigError> {
        let clean_name = company_name.trim().to_uppercase();
        if clean_name.is_empty() {
            return Err(ConfigError::validation("company name is empty"));
        }

        let mut url = self.base()?;
        url.path_segments_mut()
            .map_err(|()| ConfigError::validation(format!("base_url '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push(&self.search_path)
            .push(&clean_name);
        Ok(url.to_string())
    }
}

/// Lookup tables behind the classification heuristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// CIN prefixes that mark a limited liability partnership
    pub llp_prefixes: Vec<String>,

    /// Shorter identifiers are classified as unknown
    pub min_cin_length: usize,

    /// Ordered state-code table; earlier entries win
    pub state_codes: Vec<StateCode>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            llp_prefixes: DEFAULT_LLP_PREFIXES.iter().map(ToString::to_string).collect(),
            min_cin_length: DEFAULT_MIN_CIN_LENGTH,
            state_codes: default_state_codes(),
        }
    }
}

impl ClassificationConfig {
    pub fn address_classifier(&self) -> Result<AddressClassifier, regex::Error> {
        AddressClassifier::with_states(self.state_codes.iter().cloned())
    }

    pub fn company_type_classifier(&self) -> CompanyTypeClassifier {
        CompanyTypeClassifier::new(&self.llp_prefixes, self.min_cin_length)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Enable console output (stderr)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Log directory; next to the executable when unset
    pub log_dir: Option<PathBuf>,

    /// Log file naming strategy: "unified" or "timestamped"
    pub file_naming_strategy: String,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: IndexMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_naming_strategy: defaults::LOG_FILE_NAMING_STRATEGY.to_string(),
            module_filters: [
                ("reqwest", "info"),
                ("hyper", "warn"),
                ("html5ever", "warn"),
                ("selectors", "warn"),
            ]
            .into_iter()
            .map(|(module, level)| (module.to_string(), level.to_string()))
            .collect(),
        }
    }
}

/// Export destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory used when the command line names none
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(defaults::EXPORT_DIR),
        }
    }
}

impl AppConfig {
    /// Load from a configuration file layered over the defaults, then apply
    /// environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Defaults, optional file, then environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder().add_source(config::Config::try_from(&Self::default())?);
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration value validation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.site.base()?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::validation(format!(
                "base_url '{}' cannot be used as a base",
                self.site.base_url
            )));
        }

        if self.site.max_results == 0 {
            return Err(ConfigError::validation("max_results must be greater than 0"));
        }

        if self.fetcher.timeout_seconds == 0 {
            return Err(ConfigError::validation("timeout_seconds must be greater than 0"));
        }

        if self.classification.llp_prefixes.iter().all(|prefix| prefix.trim().is_empty()) {
            return Err(ConfigError::validation("llp_prefixes must not be empty"));
        }

        if !defaults::LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }

        if !self.logging.console_output && !self.logging.file_output {
            return Err(ConfigError::validation("no logging output configured"));
        }

        Ok(())
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Create a configuration manager for the standard location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Create a configuration manager for an explicit file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !fs::try_exists(&self.config_path).await.unwrap_or(false) {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let config = AppConfig::from_file(&self.config_path)
            .with_context(|| format!("Failed to load configuration from {:?}", self.config_path))?;
        info!("Loaded configuration from: {:?}", self.config_path);
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Overwrite the file with the built-in defaults
    pub async fn reset_to_defaults(&self) -> Result<AppConfig> {
        let config = AppConfig::default();
        self.save_config(&config).await?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Default configuration values
pub mod defaults {
    /// Registry site root
    pub const BASE_URL: &str = "https://www.zaubacorp.com";

    /// Path segment for search results
    pub const SEARCH_PATH: &str = "companysearchresults";

    /// Default number of search results to keep
    pub const MAX_RESULTS: usize = 50;

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "CORP_REGISTRY";

    /// Directory name under the user config directory
    pub const APP_DIR_NAME: &str = "corp-registry";

    pub const CONFIG_FILE_NAME: &str = "corp_registry_config.json";

    pub const EXPORT_DIR: &str = "exports";

    // Logging
    pub const LOG_LEVEL: &str = "info";
    pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAMING_STRATEGY: &str = "unified";
    pub const LOG_FILE_NAME: &str = "corp-registry.log";
}
