//! Response cache for fetched pages
//!
//! This module keeps every successful HTTP response in a SQLite database keyed
//! by URL, so repeated runs against the same site do not refetch hundreds of
//! PEP pages. It handles:
//! - SQLite database initialization and schema management
//! - Lookups with optional expiry
//! - Clearing the cache before a run

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteCache;
pub use traits::{CacheError, CacheResult, ResponseCache};

use chrono::{DateTime, Duration, Utc};
use std::path::Path;

/// Opens or creates the cache database at `path`
pub fn open_cache(path: &Path) -> CacheResult<SqliteCache> {
    SqliteCache::new(path)
}

/// A response stored in the cache
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedResponse {
    /// Returns true if the response is older than `max_age`
    pub fn is_stale(&self, max_age: Duration) -> bool {
        Utc::now() - self.fetched_at > max_age
    }
}
