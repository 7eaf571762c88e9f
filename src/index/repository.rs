//! TagIndex trait and result types.

use crate::domain::{NoteAttribute, SeekPositions, Tag, TagDelta, TagQuery};
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// IndexError Type
// ===========================================

/// Errors that can occur during index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The store could not be opened or accessed.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    /// A stored attribute record failed to deserialize.
    #[error("corrupt attribute record for '{name}': {source}")]
    Corrupt {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A tag count row holds an invalid tag or a non-positive count.
    #[error("corrupt tag count row for '{tag}': {reason}")]
    CorruptCount { tag: String, reason: String },

    /// An attribute record could not be serialized.
    #[error("failed to encode attribute record for '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error occurred while preparing the store.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

// ===========================================
// FilterPage Type
// ===========================================

/// One page of tag query results.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPage {
    names: Vec<String>,
    next_seek: SeekPositions,
    exhausted: bool,
}

impl FilterPage {
    pub fn new(names: Vec<String>, next_seek: SeekPositions, exhausted: bool) -> Self {
        Self {
            names,
            next_seek,
            exhausted,
        }
    }

    /// A page for a query with nothing to scan.
    pub fn empty() -> Self {
        Self::new(Vec::new(), SeekPositions::new(), true)
    }

    /// Matching note names in discovery order, without duplicates.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Cursor positions to pass to the next call to continue.
    pub fn next_seek(&self) -> &SeekPositions {
        &self.next_seek
    }

    /// True once every primary cursor has run past its last member.
    ///
    /// Resuming an exhausted query only re-reads the boundary names.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

// ===========================================
// TagWithCount Type
// ===========================================

/// A tag with associated note count.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWithCount {
    tag: Tag,
    count: u64,
}

impl TagWithCount {
    pub fn new(tag: Tag, count: u64) -> Self {
        Self { tag, count }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Returns the number of notes currently carrying this tag.
    pub fn count(&self) -> u64 {
        self.count
    }
}

// ===========================================
// TagStatsPage Type
// ===========================================

/// One page of the tag count listing, in tag byte order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagStatsPage {
    stats: Vec<TagWithCount>,
}

impl TagStatsPage {
    pub fn new(stats: Vec<TagWithCount>) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> &[TagWithCount] {
        &self.stats
    }

    /// The last tag read, used to resume the listing. `None` for an empty page.
    pub fn last_key(&self) -> Option<&Tag> {
        self.stats.last().map(TagWithCount::tag)
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

// ===========================================
// TagIndex Trait
// ===========================================

/// Repository trait for the tag index.
///
/// Implementations keep, for every note name, its attribute record, and for
/// every tag, the set of names carrying it plus a member count. The count of
/// a tag always equals the size of its membership set once a write returns.
pub trait TagIndex {
    /// Looks up the attribute record stored for a note.
    fn attribute(&self, name: &str) -> IndexResult<Option<NoteAttribute>>;

    /// Stores a note's attributes and updates tag membership and counts.
    ///
    /// Everything happens in one transaction. Returns the delta applied.
    fn index_note(&mut self, name: &str, attribute: &NoteAttribute) -> IndexResult<TagDelta>;

    /// Evaluates a tag query, resuming each primary cursor from `seek`.
    ///
    /// `max` bounds the number of cursor rounds, not the number of results.
    fn filter(
        &mut self,
        query: &TagQuery,
        seek: &SeekPositions,
        max: usize,
    ) -> IndexResult<FilterPage>;

    /// Lists up to `limit` tag counts with tags strictly after `seek`.
    fn tag_stats(&self, seek: Option<&str>, limit: usize) -> IndexResult<TagStatsPage>;
}
