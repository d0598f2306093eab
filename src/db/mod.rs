//! Database module
//!
//! SQLite connection pool and migrations for the subscriber log.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
