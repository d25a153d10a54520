//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for pages and binary archives
//! - Serving repeated requests from the response cache
//! - Containing transport errors behind an absence signal

use crate::cache::{open_cache, ResponseCache, SqliteCache};
use crate::config::{Config, HttpConfig, UserAgentConfig};
use crate::fetch::PageSource;
use crate::ParserError;
use reqwest::Client;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// Result of a single network request
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the resource
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Raw response body
        body: Vec<u8>,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use docs_parser::config::{HttpConfig, UserAgentConfig};
/// use docs_parser::fetch::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    // Format: Name/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        user_agent.crawler_name, user_agent.crawler_version, user_agent.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends one GET request and classifies the outcome
///
/// Redirects are followed by the client. Any status outside 2xx is reported
/// as `HttpError` so error pages never reach the extractors.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body: body.to_vec(),
        },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read response body: {}", e),
        },
    }
}

/// Page source backed by HTTP and a response cache
pub struct HttpFetcher<C: ResponseCache = SqliteCache> {
    client: Client,
    cache: C,
    max_age: Option<chrono::Duration>,
}

impl HttpFetcher<SqliteCache> {
    /// Builds the client and opens the on-disk cache named in the configuration
    pub fn from_config(config: &Config) -> Result<Self, ParserError> {
        let max_age = config.cache.max_age()?;
        let client = build_http_client(&config.user_agent, &config.http)?;
        let cache = open_cache(Path::new(&config.cache.database_path))?;
        Ok(Self::new(client, cache, max_age))
    }
}

impl<C: ResponseCache> HttpFetcher<C> {
    pub fn new(client: Client, cache: C, max_age: Option<chrono::Duration>) -> Self {
        Self {
            client,
            cache,
            max_age,
        }
    }

    /// The response cache backing this fetcher
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Empties the response cache before a run
    pub fn clear_cache(&self) -> Result<usize, ParserError> {
        let removed = self.cache.clear()?;
        tracing::info!("Cleared {} cached responses", removed);
        Ok(removed)
    }

    /// Returns a fresh cached body for `url`, if any
    ///
    /// Cache read failures are logged and treated as misses.
    fn cached_body(&self, url: &str) -> Option<Vec<u8>> {
        let cached = match self.cache.get(url) {
            Ok(cached) => cached?,
            Err(e) => {
                tracing::warn!("Cache lookup failed for {}: {}", url, e);
                return None;
            }
        };

        if let Some(max_age) = self.max_age {
            if cached.is_stale(max_age) {
                tracing::debug!("Cached response for {} is stale", url);
                return None;
            }
        }

        tracing::debug!("Cache hit for {} (HTTP {})", url, cached.status_code);
        Some(cached.body)
    }

    async fn load(&self, url: &str) -> Option<Vec<u8>> {
        if let Some(body) = self.cached_body(url) {
            return Some(body);
        }

        match fetch_url(&self.client, url).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                if final_url != url {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                if let Err(e) = self.cache.put(url, status_code, &body) {
                    tracing::warn!("Failed to cache response for {}: {}", url, e);
                }
                Some(body)
            }
            FetchResult::HttpError { status_code } => {
                tracing::error!("Failed to load page {}: HTTP {}", url, status_code);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::error!("Failed to load page {}: {}", url, error);
                None
            }
        }
    }
}

impl<C: ResponseCache> PageSource for HttpFetcher<C> {
    fn fetch_bytes(&self, url: &str) -> impl Future<Output = Option<Vec<u8>>> {
        self.load(url)
    }
}
