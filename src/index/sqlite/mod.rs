//! SQLite-backed tag index implementation.

mod attributes;
mod connection;
mod consistency;
mod maintainer;
mod query;
mod repo_impl;
mod stats;
mod transaction;


use rusqlite::Connection;

pub use consistency::ConsistencyIssue;
pub use transaction::Transaction;

// ===========================================
// SqliteIndex Struct
// ===========================================

/// SQLite-backed tag index.
///
/// Owns the database connection. Writes go through [`Transaction`], which
/// carries the attribute store and membership maintenance operations so a
/// caller can commit them together with its own side effects.
pub struct SqliteIndex {
    pub(crate) conn: Connection,
}
