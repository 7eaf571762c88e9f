//! Tag stats enumeration over the counts table.

use crate::domain::Tag;
use crate::index::{IndexError, IndexResult, TagStatsPage, TagWithCount};
use rusqlite::Connection;

/// Reads up to `limit` tag counts in tag byte order.
///
/// With a non-empty `seek`, listing starts strictly after that tag, so
/// passing each page's last key to the next call never repeats a tag.
pub(super) fn list_tag_stats(
    conn: &Connection,
    seek: Option<&str>,
    limit: usize,
) -> IndexResult<TagStatsPage> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let rows: Vec<(String, i64)> = match seek.filter(|s| !s.is_empty()) {
        Some(after) => conn
            .prepare_cached(
                "SELECT tag, count FROM tag_counts WHERE tag > ?1 ORDER BY tag LIMIT ?2",
            )?
            .query_map(rusqlite::params![after, limit], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<_, _>>()?,
        None => conn
            .prepare_cached("SELECT tag, count FROM tag_counts ORDER BY tag LIMIT ?1")?
            .query_map([limit], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?,
    };

    let stats = rows
        .into_iter()
        .map(|(name, count)| decode_row(name, count))
        .collect::<IndexResult<Vec<_>>>()?;

    tracing::debug!(seek, returned = stats.len(), "listed tag stats");
    Ok(TagStatsPage::new(stats))
}

fn decode_row(name: String, count: i64) -> IndexResult<TagWithCount> {
    let tag = Tag::new(&name).map_err(|e| IndexError::CorruptCount {
        tag: name.clone(),
        reason: e.to_string(),
    })?;
    match u64::try_from(count) {
        Ok(count) if count > 0 => Ok(TagWithCount::new(tag, count)),
        _ => Err(IndexError::CorruptCount {
            tag: name,
            reason: format!("count {} is not positive", count),
        }),
    }
}
