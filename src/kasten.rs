//! The note store: note bodies on disk plus the tag index.

use crate::domain::{NoteAttribute, ParseSeekError, SeekPositions, TagDelta, TagQuery};
use crate::index::{
    ConsistencyIssue, FilterPage, IndexError, SqliteIndex, TagIndex, TagStatsPage,
};
use crate::infra::{self, FsError, NoteFiles, ParseError};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the index database inside the store directory.
pub const INDEX_FILE: &str = "index.db";

/// Directory holding note bodies inside the store directory.
pub const NOTES_DIR: &str = "notes";

/// Errors surfaced by note store operations.
#[derive(Debug, Error)]
pub enum KastenError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("note not found: {name}")]
    NotFound { name: String },

    #[error("failed to extract header from note '{name}': {source}")]
    ExtractionFailed {
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid seek token: {0}")]
    InvalidSeekToken(#[from] ParseSeekError),

    #[error("invalid note name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Storage(#[from] FsError),
}

pub type KastenResult<T> = Result<T, KastenError>;

/// A personal knowledge base rooted at one directory.
///
/// Layout:
/// ```text
/// <home>/index.db          tag index
/// <home>/notes/<name>.md   raw note content, name percent-escaped
/// ```
pub struct Kasten {
    home: PathBuf,
    index: SqliteIndex,
    files: NoteFiles,
}

impl Kasten {
    /// Opens (creating if needed) the store rooted at `home`.
    pub fn open(home: &Path) -> KastenResult<Self> {
        let index = SqliteIndex::open(&home.join(INDEX_FILE))?;
        let files = NoteFiles::new(home.join(NOTES_DIR));
        Ok(Self {
            home: home.to_path_buf(),
            index,
            files,
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Saves a note, replacing any previous version with the same name.
    ///
    /// See [`Kasten::put_note_at`].
    pub fn put_note(&mut self, name: &str, content: &str) -> KastenResult<TagDelta> {
        self.put_note_at(name, content, Utc::now())
    }

    /// Saves a note as of `now`, which fills timestamps missing from its header.
    /// A rewrite whose header omits `created_at` keeps the stored creation time.
    ///
    /// The header is extracted first; a malformed header fails the call
    /// before anything is written. The attribute record, tag membership,
    /// counts and note body are then written in one transaction: if writing
    /// the body fails, the index changes roll back with it.
    pub fn put_note_at(
        &mut self,
        name: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> KastenResult<TagDelta> {
        if name.is_empty() {
            return Err(KastenError::InvalidName(name.to_string()));
        }

        let parsed = infra::parse(content).map_err(|source| KastenError::ExtractionFailed {
            name: name.to_string(),
            source,
        })?;

        let tx = self.index.transaction()?;
        let previous = tx.get_attribute(name)?;
        let attribute = parsed.header.into_attribute(now, previous.as_ref());
        tx.put_attribute(name, &attribute)?;
        let delta = TagDelta::between(previous.as_ref(), &attribute);
        tx.apply_delta(name, &delta)?;
        self.files.write(name, content)?;
        tx.commit()?;

        tracing::info!(
            name,
            tags = attribute.tags().len(),
            added = delta.added().len(),
            removed = delta.removed().len(),
            "saved note"
        );
        Ok(delta)
    }

    /// Returns a note's raw content exactly as it was saved.
    pub fn read_note(&self, name: &str) -> KastenResult<String> {
        self.files.read(name).map_err(|e| match e {
            FsError::NotFound { .. } => KastenError::NotFound {
                name: name.to_string(),
            },
            other => KastenError::Storage(other),
        })
    }

    /// Returns the attributes indexed for a note.
    pub fn attribute(&self, name: &str) -> KastenResult<NoteAttribute> {
        self.index
            .attribute(name)?
            .ok_or_else(|| KastenError::NotFound {
                name: name.to_string(),
            })
    }

    /// Finds notes matching a tag query. `max` bounds cursor rounds.
    pub fn filter(
        &mut self,
        query: &TagQuery,
        seek: &SeekPositions,
        max: usize,
    ) -> KastenResult<FilterPage> {
        Ok(self.index.filter(query, seek, max)?)
    }

    /// Lists tag counts after `seek`, at most `limit` of them.
    pub fn tags_stats(&self, seek: Option<&str>, limit: usize) -> KastenResult<TagStatsPage> {
        Ok(self.index.tag_stats(seek, limit)?)
    }

    /// Verifies that counts, membership and attributes agree.
    pub fn check(&self) -> KastenResult<Vec<ConsistencyIssue>> {
        Ok(self.index.check_consistency()?)
    }
}
