//! SQLite cache implementation
//!
//! This module provides a SQLite-based implementation of the ResponseCache trait.

use crate::cache::schema::initialize_schema;
use crate::cache::traits::{CacheError, CacheResult, ResponseCache};
use crate::cache::CachedResponse;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite cache backend
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    /// Opens or creates the cache database at `path`
    ///
    /// Parent directories are created when missing.
    pub fn new(path: &Path) -> CacheResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory cache
    pub fn new_in_memory() -> CacheResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl ResponseCache for SqliteCache {
    fn get(&self, url: &str) -> CacheResult<Option<CachedResponse>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status_code, body, fetched_at FROM responses WHERE url = ?1")?;

        let row = stmt
            .query_row(params![url], |row| {
                Ok((
                    row.get::<_, u16>(0)?,
                    row.get::<_, Vec<u8>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .optional()?;

        let Some((status_code, body, fetched_at)) = row else {
            return Ok(None);
        };

        let fetched_at = DateTime::parse_from_rfc3339(&fetched_at)
            .map_err(|e| CacheError::Corrupt {
                url: url.to_string(),
                message: e.to_string(),
            })?
            .with_timezone(&Utc);

        Ok(Some(CachedResponse {
            status_code,
            body,
            fetched_at,
        }))
    }

    fn put(&self, url: &str, status_code: u16, body: &[u8]) -> CacheResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (url, status_code, body, fetched_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![url, status_code, body, now],
        )?;
        Ok(())
    }

    fn clear(&self) -> CacheResult<usize> {
        let removed = self.conn.execute("DELETE FROM responses", [])?;
        Ok(removed)
    }

    fn count(&self) -> CacheResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
