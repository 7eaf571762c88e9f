//! Consistency check between attribute records, membership, and counts.

use super::SqliteIndex;
use crate::domain::NoteAttribute;
use crate::index::{IndexError, IndexResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A disagreement found by [`SqliteIndex::check_consistency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    /// The stored count differs from the number of membership rows.
    CountMismatch {
        tag: String,
        recorded: u64,
        actual: u64,
    },
    /// A note's attributes list a tag but the note is not a member of it.
    MissingMembership { name: String, tag: String },
    /// A note is a member of a tag its attributes don't list.
    StrayMembership { name: String, tag: String },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::CountMismatch {
                tag,
                recorded,
                actual,
            } => write!(
                f,
                "tag '{}' has count {} but {} members",
                tag, recorded, actual
            ),
            ConsistencyIssue::MissingMembership { name, tag } => {
                write!(f, "note '{}' is tagged '{}' but not indexed under it", name, tag)
            }
            ConsistencyIssue::StrayMembership { name, tag } => {
                write!(f, "note '{}' is indexed under '{}' without that tag", name, tag)
            }
        }
    }
}

impl SqliteIndex {
    /// Compares counts against membership and membership against attributes.
    ///
    /// Returns every issue found; an empty list means the index is consistent.
    pub fn check_consistency(&self) -> IndexResult<Vec<ConsistencyIssue>> {
        let mut issues = Vec::new();

        let recorded: BTreeMap<String, i64> = self
            .conn
            .prepare("SELECT tag, count FROM tag_counts")?
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;

        let actual: BTreeMap<String, i64> = self
            .conn
            .prepare("SELECT tag, COUNT(*) FROM tag_members GROUP BY tag")?
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;

        let tags: BTreeSet<&String> = recorded.keys().chain(actual.keys()).collect();
        for tag in tags {
            let r = recorded.get(tag).copied().unwrap_or(0);
            let a = actual.get(tag).copied().unwrap_or(0);
            if r != a {
                issues.push(ConsistencyIssue::CountMismatch {
                    tag: tag.clone(),
                    recorded: u64::try_from(r).unwrap_or(0),
                    actual: u64::try_from(a).unwrap_or(0),
                });
            }
        }

        let members: BTreeSet<(String, String)> = self
            .conn
            .prepare("SELECT name, tag FROM tag_members")?
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;

        let mut expected: BTreeSet<(String, String)> = BTreeSet::new();
        let records: Vec<(String, String)> = self
            .conn
            .prepare("SELECT name, data FROM attributes")?
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;
        for (name, data) in records {
            let attribute: NoteAttribute =
                serde_json::from_str(&data).map_err(|source| IndexError::Corrupt {
                    name: name.clone(),
                    source,
                })?;
            for tag in attribute.tags() {
                expected.insert((name.clone(), tag.to_string()));
            }
        }

        for (name, tag) in expected.difference(&members) {
            issues.push(ConsistencyIssue::MissingMembership {
                name: name.clone(),
                tag: tag.clone(),
            });
        }
        for (name, tag) in members.difference(&expected) {
            issues.push(ConsistencyIssue::StrayMembership {
                name: name.clone(),
                tag: tag.clone(),
            });
        }

        Ok(issues)
    }
}
