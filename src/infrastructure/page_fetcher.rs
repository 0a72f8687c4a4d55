//! Page fetching for registry pages
//!
//! `PageFetcher` is the seam between the lookup service and the network.
//! `HttpPageFetcher` performs single GET requests with browser-like headers;
//! `StaticPageFetcher` serves pages from memory for tests and saved pages.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    #[error("HTTP error {status}: {url}")]
    Http { status: u16, url: String },

    #[error("HTTP request failed for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("No page stored for {url}")]
    NotFound { url: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

impl FetchError {
    fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout { url: url.to_string() }
        } else {
            Self::Transport {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Source of raw page HTML
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Configuration for HTTP fetcher behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User agent string
    pub user_agent: String,
    /// Extra request headers sent with every request
    pub headers: IndexMap<String, String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        let headers = [
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.9"),
            ("DNT", "1"),
            ("Upgrade-Insecure-Requests", "1"),
            ("Sec-Fetch-Dest", "document"),
            ("Sec-Fetch-Mode", "navigate"),
            ("Sec-Fetch-Site", "none"),
            ("Sec-Fetch-User", "?1"),
            ("sec-ch-ua", r#""Not_A Brand";v="8", "Chromium";v="120", "Google Chrome";v="120""#),
            ("sec-ch-ua-mobile", "?0"),
            ("sec-ch-ua-platform", r#""Windows""#),
            ("Cache-Control", "max-age=0"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            headers,
            timeout_seconds: 30,
            follow_redirects: true,
        }
    }
}

impl FetcherConfig {
    fn header_map(&self) -> Result<HeaderMap, FetchError> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FetchError::ClientBuild(format!("invalid header name '{name}': {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| FetchError::ClientBuild(format!("invalid value for header '{name}': {e}")))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

/// Page fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Create a new HTTP fetcher with custom configuration
    pub fn with_config(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .default_headers(config.header_map()?)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let target = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        info!("🌐 HTTP GET: {}", url);
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("❌ HTTP error {}: {}", status, url);
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// In-memory fetcher keyed by exact URL
#[derive(Debug, Default)]
pub struct StaticPageFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.insert(url, html);
        self
    }

    pub fn insert(&mut self, url: &str, html: &str) {
        self.pages.insert(url.to_string(), html.to_string());
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for StaticPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound { url: url.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_a_client() {
        let config = FetcherConfig::default();
        assert!(config.user_agent.contains("Chrome/120"));
        assert_eq!(config.headers["Accept-Language"], "en-US,en;q=0.9");
        assert!(HttpPageFetcher::with_config(&config).is_ok());
    }

    #[test]
    fn invalid_header_is_a_build_error() {
        let mut config = FetcherConfig::default();
        config.headers.insert("Bad Header".to_string(), "x".to_string());
        assert!(matches!(
            HttpPageFetcher::with_config(&config),
            Err(FetchError::ClientBuild(_))
        ));
    }

    #[tokio::test]
    async fn static_fetcher_serves_known_pages() {
        let fetcher = StaticPageFetcher::new().with_page("https://x.test/a", "<p>a</p>");
        assert_eq!(fetcher.fetch("https://x.test/a").await.unwrap(), "<p>a</p>");
        assert_eq!(
            fetcher.fetch("https://x.test/b").await,
            Err(FetchError::NotFound {
                url: "https://x.test/b".to_string()
            })
        );
        assert_eq!(fetcher.requests(), vec!["https://x.test/a", "https://x.test/b"]);
    }

    #[tokio::test]
    async fn http_fetcher_rejects_invalid_urls() {
        let fetcher = HttpPageFetcher::with_config(&FetcherConfig::default()).unwrap();
        assert!(matches!(
            fetcher.fetch("not a url").await,
            Err(FetchError::InvalidUrl { .. })
        ));
    }
}
