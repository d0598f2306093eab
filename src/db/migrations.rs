//! Database migrations
//!
//! Schema creation and versioning.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: subscriber log
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- SUBSCRIBERS
        -- Append-only log of newsletter sign-ups
        -- ============================================
        CREATE TABLE subscribers (
            id TEXT PRIMARY KEY,                 -- uuid v4
            email TEXT NOT NULL,
            source TEXT NOT NULL,                -- page or form the sign-up came from
            timestamp TEXT NOT NULL,             -- client-reported or server time, RFC 3339
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_subscribers_email ON subscribers(email);
        CREATE INDEX idx_subscribers_source ON subscribers(source);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version, 0 before any migration has run
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let has_table: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations'",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
