//! SQLite tag index: attribute store, membership maintenance, queries, stats

mod repository;
mod schema;
mod sqlite;

pub use repository::{
    FilterPage, IndexError, IndexResult, TagIndex, TagStatsPage, TagWithCount,
};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{ConsistencyIssue, SqliteIndex, Transaction};
