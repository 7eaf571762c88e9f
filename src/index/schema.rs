//! SQLite schema creation for the tag index.

use rusqlite::Connection;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the tag index.
///
/// Idempotent: calling it on an existing database is a no-op.
///
/// # Tables Created
/// - `attributes` - One JSON attribute record per note name
/// - `tags` - Registry of every tag whose membership table exists
/// - `tag_members` - Per-tag membership, keyed by `(tag, name)`
/// - `tag_counts` - Number of member notes per tag (positive counts only)
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS attributes (
            name TEXT PRIMARY KEY,
            data TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tags (
            name TEXT PRIMARY KEY
        );",
    )?;

    // The composite key keeps each tag's members contiguous and ordered by
    // name, which is what the query cursors scan.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tag_members (
            tag TEXT NOT NULL REFERENCES tags(name),
            name TEXT NOT NULL,
            marker INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (tag, name)
        ) WITHOUT ROWID;",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tag_counts (
            tag TEXT PRIMARY KEY,
            count INTEGER NOT NULL CHECK (count > 0)
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
