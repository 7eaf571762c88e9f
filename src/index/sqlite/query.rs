//! Tag query engine: cursor-driven evaluation of DNF tag queries.
//!
//! Each clause is driven by one primary tag. Every round advances each open
//! primary cursor by one member, then checks the surfaced names against all
//! clauses. `max` bounds rounds, not results.

use super::maintainer::ensure_tag;
use super::transaction::Transaction;
use crate::domain::{SeekPositions, Tag, TagQuery};
use crate::index::{FilterPage, IndexResult};
use rusqlite::{Connection, OptionalExtension};
use std::collections::{BTreeMap, HashSet};

// ===========================================
// Membership Cursor
// ===========================================

/// Forward cursor over one tag's members, in name byte order.
struct MemberCursor<'c> {
    conn: &'c Connection,
    tag: &'c Tag,
    position: Option<String>,
}

impl<'c> MemberCursor<'c> {
    fn new(conn: &'c Connection, tag: &'c Tag) -> Self {
        Self {
            conn,
            tag,
            position: None,
        }
    }

    fn first(&mut self) -> IndexResult<Option<String>> {
        let name = self
            .conn
            .prepare_cached(
                "SELECT name FROM tag_members WHERE tag = ?1 ORDER BY name LIMIT 1",
            )?
            .query_row([self.tag.as_str()], |row| row.get(0))
            .optional()?;
        Ok(self.land(name))
    }

    /// Positions at the first member at or after `key`.
    fn seek(&mut self, key: &str) -> IndexResult<Option<String>> {
        let name = self
            .conn
            .prepare_cached(
                "SELECT name FROM tag_members WHERE tag = ?1 AND name >= ?2 ORDER BY name LIMIT 1",
            )?
            .query_row([self.tag.as_str(), key], |row| row.get(0))
            .optional()?;
        Ok(self.land(name))
    }

    /// Advances to the member strictly after the current position.
    fn next(&mut self) -> IndexResult<Option<String>> {
        let Some(current) = self.position.as_deref() else {
            return self.first();
        };
        let name = self
            .conn
            .prepare_cached(
                "SELECT name FROM tag_members WHERE tag = ?1 AND name > ?2 ORDER BY name LIMIT 1",
            )?
            .query_row([self.tag.as_str(), current], |row| row.get(0))
            .optional()?;
        Ok(self.land(name))
    }

    fn land(&mut self, name: Option<String>) -> Option<String> {
        if let Some(name) = &name {
            self.position = Some(name.clone());
        }
        name
    }
}

fn is_member(conn: &Connection, tag: &Tag, name: &str) -> IndexResult<bool> {
    let found = conn
        .prepare_cached("SELECT 1 FROM tag_members WHERE tag = ?1 AND name = ?2")?
        .query_row([tag.as_str(), name], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

// ===========================================
// Filter State
// ===========================================

/// Iteration state threaded through the rounds of one filter call.
struct FilterState<'c> {
    /// Open cursors, in primary order.
    active: Vec<MemberCursor<'c>>,
    /// Last name read per primary tag, seeded from the incoming seek.
    positions: BTreeMap<&'c Tag, String>,
    seen: HashSet<String>,
    results: Vec<String>,
}

impl<'c> FilterState<'c> {
    fn new(conn: &'c Connection, primaries: Vec<&'c Tag>, seek: &SeekPositions) -> Self {
        let positions = primaries
            .iter()
            .filter_map(|tag| seek.get(tag).map(|name| (*tag, name.to_string())))
            .collect();
        let active = primaries
            .into_iter()
            .map(|tag| MemberCursor::new(conn, tag))
            .collect();

        Self {
            active,
            positions,
            seen: HashSet::new(),
            results: Vec::new(),
        }
    }

    /// Advances every open cursor one step and returns the names surfaced,
    /// in cursor order without repeats. Exhausted cursors are closed.
    ///
    /// The first round resumes at the seek key itself (inclusive), so a
    /// resumed call reads its boundary name again.
    fn advance(&mut self, round: usize, seek: &SeekPositions) -> IndexResult<Vec<String>> {
        let mut surfaced: Vec<String> = Vec::new();
        let mut exhausted: Vec<usize> = Vec::new();

        for (i, cursor) in self.active.iter_mut().enumerate() {
            let read = if round == 0 {
                match seek.get(cursor.tag) {
                    Some(key) => cursor.seek(key)?,
                    None => cursor.first()?,
                }
            } else {
                cursor.next()?
            };

            match read {
                Some(name) => {
                    self.positions.insert(cursor.tag, name.clone());
                    if !surfaced.contains(&name) {
                        surfaced.push(name);
                    }
                }
                None => exhausted.push(i),
            }
        }

        for i in exhausted.into_iter().rev() {
            self.active.remove(i);
        }

        Ok(surfaced)
    }

    fn accept(&mut self, name: String) {
        if self.seen.insert(name.clone()) {
            self.results.push(name);
        }
    }

    fn into_page(self) -> FilterPage {
        let exhausted = self.active.is_empty();
        let next_seek = self
            .positions
            .into_iter()
            .map(|(tag, name)| (tag.clone(), name))
            .collect();
        FilterPage::new(self.results, next_seek, exhausted)
    }
}

/// True if `name` satisfies at least one clause of the query.
fn matches_any(conn: &Connection, query: &TagQuery, name: &str) -> IndexResult<bool> {
    'clauses: for clause in query.clauses() {
        for tag in clause {
            if !is_member(conn, tag, name)? {
                continue 'clauses;
            }
        }
        return Ok(true);
    }
    Ok(false)
}

// ===========================================
// Filter Entry Point
// ===========================================

impl Transaction<'_> {
    /// Evaluates `query` for up to `max` rounds, resuming from `seek`.
    ///
    /// Membership tables for every tag in the query are created if missing;
    /// no other data is written.
    pub fn filter(
        &self,
        query: &TagQuery,
        seek: &SeekPositions,
        max: usize,
    ) -> IndexResult<FilterPage> {
        if query.is_empty() {
            return Ok(FilterPage::empty());
        }

        let conn = self.conn();
        for tag in query.tags() {
            ensure_tag(conn, tag)?;
        }

        let primaries = query.primary_tags();
        tracing::debug!(query = %query, primaries = primaries.len(), max, "filtering notes");

        let mut state = FilterState::new(conn, primaries, seek);
        let mut round = 0;

        while round < max && !state.active.is_empty() {
            for name in state.advance(round, seek)? {
                if !state.seen.contains(&name) && matches_any(conn, query, &name)? {
                    state.accept(name);
                }
            }
            round += 1;
        }

        tracing::debug!(rounds = round, results = state.results.len(), "filter finished");
        Ok(state.into_page())
    }
}
