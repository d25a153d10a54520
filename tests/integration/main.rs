//! Integration tests for Docs-Parser
//!
//! These tests run the extraction modes against wiremock servers standing in
//! for the documentation site and the PEP index.

mod extract_tests;
mod fetch_tests;

use docs_parser::cache::SqliteCache;
use docs_parser::config::{Config, HttpConfig, UserAgentConfig};
use docs_parser::fetch::{build_http_client, HttpFetcher};
use wiremock::MockServer;

/// Creates a fetcher with an in-memory cache
pub fn create_test_fetcher() -> HttpFetcher<SqliteCache> {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    };
    let client = build_http_client(&user_agent, &HttpConfig { timeout_secs: 5 })
        .expect("Failed to build client");
    let cache = SqliteCache::new_in_memory().expect("Failed to open cache");
    HttpFetcher::new(client, cache, None)
}

/// Creates a configuration pointing both sites at the mock server
pub fn create_test_config(server: &MockServer, downloads_dir: &str) -> Config {
    let mut config = Config::default();
    config.site.main_doc_url = format!("{}/3/", server.uri());
    config.site.peps_url = format!("{}/peps/", server.uri());
    config.output.downloads_dir = downloads_dir.to_string();
    config
}
