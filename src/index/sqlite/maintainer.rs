//! Tag index maintenance: applies a note's tag delta to membership and counts.

use super::transaction::Transaction;
use crate::domain::{Tag, TagDelta};
use crate::index::IndexResult;
use rusqlite::{Connection, OptionalExtension};
use std::collections::BTreeMap;

/// Registers a tag's membership table if it doesn't exist yet.
pub(super) fn ensure_tag(conn: &Connection, tag: &Tag) -> IndexResult<()> {
    conn.prepare_cached("INSERT OR IGNORE INTO tags (name) VALUES (?1)")?
        .execute([tag.as_str()])?;
    Ok(())
}

impl Transaction<'_> {
    /// Moves `name` in or out of the membership table of every touched tag
    /// and adjusts the counts by the same amounts.
    ///
    /// A count that would drop below zero is clamped to zero, and a zero
    /// count removes the tag's row from `tag_counts`. Nothing is visible
    /// outside the transaction until it commits.
    pub fn apply_delta(&self, name: &str, delta: &TagDelta) -> IndexResult<()> {
        let conn = self.conn();

        for tag in delta.touched() {
            ensure_tag(conn, tag)?;
        }

        let mut pending: BTreeMap<&Tag, i64> = BTreeMap::new();

        for tag in delta.removed() {
            conn.prepare_cached("DELETE FROM tag_members WHERE tag = ?1 AND name = ?2")?
                .execute([tag.as_str(), name])?;
            *pending.entry(tag).or_insert(0) -= 1;
        }

        for tag in delta.added() {
            conn.prepare_cached(
                "INSERT OR REPLACE INTO tag_members (tag, name, marker) VALUES (?1, ?2, 1)",
            )?
            .execute([tag.as_str(), name])?;
            *pending.entry(tag).or_insert(0) += 1;
        }

        for (tag, change) in pending {
            if change != 0 {
                adjust_count(conn, tag, change)?;
            }
        }

        tracing::debug!(
            name,
            added = delta.added().len(),
            removed = delta.removed().len(),
            "applied tag delta"
        );

        Ok(())
    }
}

/// Adds `change` to a tag's count, deleting the row when it reaches zero.
fn adjust_count(conn: &Connection, tag: &Tag, change: i64) -> IndexResult<()> {
    let current: i64 = conn
        .prepare_cached("SELECT count FROM tag_counts WHERE tag = ?1")?
        .query_row([tag.as_str()], |row| row.get(0))
        .optional()?
        .unwrap_or(0);

    let mut updated = current + change;
    if updated < 0 {
        tracing::warn!(tag = %tag, current, change, "tag count went negative; clamping to zero");
        updated = 0;
    }

    if updated == 0 {
        conn.prepare_cached("DELETE FROM tag_counts WHERE tag = ?1")?
            .execute([tag.as_str()])?;
    } else {
        conn.prepare_cached(
            "INSERT INTO tag_counts (tag, count) VALUES (?1, ?2)
             ON CONFLICT(tag) DO UPDATE SET count = excluded.count",
        )?
        .execute(rusqlite::params![tag.as_str(), updated])?;
    }

    Ok(())
}
