//! Cache traits and error types

use crate::cache::CachedResponse;
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache entry for {url}: {message}")]
    Corrupt { url: String, message: String },
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for response cache backends
///
/// The cache is keyed by absolute URL. Only the fetcher writes to it; callers
/// may clear it before a run starts.
pub trait ResponseCache {
    /// Looks up a cached response
    ///
    /// # Returns
    ///
    /// * `Ok(Some(CachedResponse))` - A response is stored for this URL
    /// * `Ok(None)` - Nothing cached
    fn get(&self, url: &str) -> CacheResult<Option<CachedResponse>>;

    /// Stores a response, replacing any previous entry for the URL
    fn put(&self, url: &str, status_code: u16, body: &[u8]) -> CacheResult<()>;

    /// Removes every cached response, returning how many were dropped
    fn clear(&self) -> CacheResult<usize>;

    /// Counts cached responses
    fn count(&self) -> CacheResult<u64>;
}
