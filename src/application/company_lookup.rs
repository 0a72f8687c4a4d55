//! Company lookup service
//!
//! Coordinates fetching and parsing: builds search URLs, fetches pages
//! through a `PageFetcher` and hands the HTML to the parsers. Fetch and parse
//! failures are logged and turned into empty results.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::domain::{CompanyDetail, CompanyProfile, CompanySummary, PortfolioSummary};
use crate::infrastructure::config::{AppConfig, SiteConfig};
use crate::infrastructure::page_fetcher::PageFetcher;
use crate::infrastructure::parsing::{
    CompanyDetailParser, DetailParseContext, ParsingResult, SearchParseContext, SearchResultParser,
};

/// A search result tagged with the term that found it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub search_term: String,
    #[serde(flatten)]
    pub summary: CompanySummary,
}

/// Detail pages fetched for a batch of search hits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchDetails {
    pub profiles: Vec<CompanyProfile>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchDetails {
    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::analyze(&self.profiles)
    }
}

/// High-level service that looks companies up on the registry site
pub struct CompanyLookupService<F: PageFetcher> {
    fetcher: F,
    search_parser: SearchResultParser,
    detail_parser: CompanyDetailParser,
    site: SiteConfig,
    base_url: Url,
}

impl<F: PageFetcher> CompanyLookupService<F> {
    /// Create a new lookup service with the given configuration
    pub fn new(fetcher: F, config: &AppConfig) -> Result<Self> {
        let search_parser = SearchResultParser::with_config(&config.parsing.search_selectors, &config.classification)
            .context("Failed to create search result parser")?;
        let detail_parser =
            CompanyDetailParser::with_config(&config.parsing).context("Failed to create company detail parser")?;
        let base_url = config.site.base().context("Invalid site base URL")?;

        Ok(Self {
            fetcher,
            search_parser,
            detail_parser,
            site: config.site.clone(),
            base_url,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Default number of results when the caller gives none
    pub fn default_max_results(&self) -> usize {
        self.site.max_results
    }

    /// Search companies by name. Failures yield an empty list.
    pub async fn search(&self, company_name: &str, max_results: usize) -> Vec<CompanySummary> {
        let url = match self.site.search_url(company_name) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot search for '{}': {}", company_name, e);
                return Vec::new();
            }
        };

        info!("🔍 Searching for companies matching: '{}'", company_name);
        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Search failed: {}", e);
                return Vec::new();
            }
        };

        let context = SearchParseContext {
            base_url: self.base_url.clone(),
            max_results,
            search_term: Some(company_name.to_string()),
        };
        let summaries = self.search_parser.parse(&html, &context);
        info!("Found {} companies matching '{}'", summaries.len(), company_name);
        summaries
    }

    /// Run several searches one after another
    pub async fn batch_search<S: AsRef<str>>(&self, company_names: &[S], max_results: usize) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for name in company_names {
            let name = name.as_ref();
            let summaries = self.search(name, max_results).await;
            debug!("Batch search '{}' returned {} rows", name, summaries.len());
            hits.extend(summaries.into_iter().map(|summary| SearchHit {
                search_term: name.to_string(),
                summary,
            }));
        }
        hits
    }

    /// Fetch and parse a company detail page
    pub async fn detail(&self, url: &str) -> Option<CompanyDetail> {
        info!("📡 Fetching detailed information from: {}", url);
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Error fetching detail page: {}", e);
                return None;
            }
        };

        match self.parse_detail_page(&html, Some(url)) {
            Ok(detail) => Some(detail),
            Err(e) => {
                error!("Error parsing detail page {}: {}", url, e);
                None
            }
        }
    }

    /// Detail page of a search result
    pub async fn detail_for(&self, summary: &CompanySummary) -> Option<CompanyDetail> {
        let Some(url) = summary.detail_url.as_deref() else {
            warn!("No detail URL for '{}'", summary.name);
            return None;
        };
        self.detail(url).await
    }

    /// Fetch the detail pages of the first `max_companies` hits in order.
    ///
    /// A hit counts as failed when its page cannot be fetched or parsed or
    /// carries no company data.
    pub async fn batch_details(&self, hits: &[SearchHit], max_companies: usize) -> BatchDetails {
        let selected = &hits[..hits.len().min(max_companies)];
        info!("🔍 Extracting detailed information for {} companies", selected.len());

        let mut batch = BatchDetails::default();
        for (index, hit) in selected.iter().enumerate() {
            info!("📊 Processing {}/{}: {}", index + 1, selected.len(), hit.summary.name);
            match self.detail_for(&hit.summary).await {
                Some(detail) if !detail.is_empty() => {
                    batch.succeeded += 1;
                    batch.profiles.push(CompanyProfile {
                        search_term: hit.search_term.clone(),
                        summary: hit.summary.clone(),
                        detail,
                    });
                }
                _ => {
                    warn!("No detailed information for '{}'", hit.summary.name);
                    batch.failed += 1;
                }
            }
        }

        info!(
            "Detailed extraction complete: {} succeeded, {} failed",
            batch.succeeded, batch.failed
        );
        batch
    }

    /// Parse a saved search page
    pub fn parse_search_page(&self, html: &str, max_results: usize) -> Vec<CompanySummary> {
        let context = SearchParseContext {
            base_url: self.base_url.clone(),
            max_results,
            search_term: None,
        };
        self.search_parser.parse(html, &context)
    }

    /// Parse a saved detail page
    pub fn parse_detail_page(&self, html: &str, url: Option<&str>) -> ParsingResult<CompanyDetail> {
        let context = DetailParseContext {
            url: url.map(str::to_string),
            base_url: self.base_url.clone(),
        };
        self.detail_parser.parse(html, &context)
    }
}
