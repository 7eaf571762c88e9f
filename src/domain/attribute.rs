//! Note attributes: the indexed view of a note's header.

use super::Tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attribute record stored once per note name.
///
/// Tags form a set: order is irrelevant and duplicates collapse. A record is
/// always replaced as a whole on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAttribute {
    tags: BTreeSet<Tag>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NoteAttribute {
    /// Creates an attribute record from any collection of tags.
    pub fn new(
        tags: impl IntoIterator<Item = Tag>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tags: tags.into_iter().collect(),
            created_at,
            updated_at,
        }
    }

    /// Returns the note's tags in byte order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns true if the note carries the given tag.
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Attribute fields as they appear in a note header.
///
/// Timestamps are optional in the header. A missing `created_at` keeps the
/// previous record's value and falls back to the write time for a new note;
/// a missing `updated_at` is always the write time. Blank tags are
/// dropped rather than rejected; unknown header fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Header {
    /// Resolves the header into an attribute record written at `now`,
    /// replacing `previous` if the note already exists.
    pub fn into_attribute(
        self,
        now: DateTime<Utc>,
        previous: Option<&NoteAttribute>,
    ) -> NoteAttribute {
        let tags = self.tags.iter().filter_map(|t| Tag::new(t).ok());
        let created_at = self
            .created_at
            .or_else(|| previous.map(NoteAttribute::created_at))
            .unwrap_or(now);
        NoteAttribute::new(tags, created_at, self.updated_at.unwrap_or(now))
    }
}
