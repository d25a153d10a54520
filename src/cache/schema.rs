//! Database schema definitions for the response cache

use rusqlite::Connection;

/// SQL schema for the cache database
pub const SCHEMA_SQL: &str = r#"
-- One row per fetched URL; the latest successful response wins
CREATE TABLE IF NOT EXISTS responses (
    url TEXT PRIMARY KEY,
    status_code INTEGER NOT NULL,
    body BLOB NOT NULL,
    fetched_at TEXT NOT NULL
);
"#;

/// Creates the cache tables if they do not exist yet
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
