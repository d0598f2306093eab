//! Subscriber model
//!
//! Newsletter sign-ups kept in the local append-only log.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A newsletter subscriber record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub source: String,
    pub timestamp: String,
}

impl Subscriber {
    /// New record with a random id
    pub fn new(email: impl Into<String>, source: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            source: source.into(),
            timestamp: timestamp.into(),
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            email: row.get("email")?,
            source: row.get("source")?,
            timestamp: row.get("timestamp")?,
        })
    }

    /// Append this record to the log
    pub fn insert(&self, conn: &Connection) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO subscribers (id, email, source, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![self.id, self.email, self.source, self.timestamp],
        )?;
        Ok(())
    }

    /// List records, oldest first
    pub fn list(conn: &Connection, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM subscribers ORDER BY created_at ASC, rowid ASC LIMIT ?1 OFFSET ?2",
        )?;
        let subscribers = stmt
            .query_map(params![limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(subscribers)
    }

    /// Count records
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM subscribers", [], |row| row.get(0))?;
        Ok(count)
    }
}
