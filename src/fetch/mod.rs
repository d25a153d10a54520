//! Fetch layer
//!
//! Transport failures never escape this module: they are logged here and
//! surfaced to callers as `None`. Whether an absence aborts a whole mode or
//! just skips one entry is the caller's decision.

mod fetcher;

pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher};

use std::future::Future;

/// Something that can hand out page bodies by URL
pub trait PageSource {
    /// Fetches the raw body of `url`, or `None` if it could not be loaded
    fn fetch_bytes(&self, url: &str) -> impl Future<Output = Option<Vec<u8>>>;

    /// Fetches `url` and decodes it as UTF-8
    ///
    /// Invalid sequences are replaced rather than rejected; the documentation
    /// sites always serve UTF-8 regardless of what their headers claim.
    fn fetch_page(&self, url: &str) -> impl Future<Output = Option<String>> {
        async move {
            self.fetch_bytes(url)
                .await
                .map(|body| String::from_utf8_lossy(&body).into_owned())
        }
    }
}
