//! Resumption token for tag queries.

use super::Tag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Last note name read by each primary tag cursor.
///
/// Serialized as a flat JSON object of tag name to note name. Passing the
/// positions returned by one query into the next resumes each cursor at (not
/// after) the recorded name, so the boundary note is read once more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeekPositions(BTreeMap<Tag, String>);

/// Error returned when a resumption token cannot be decoded.
#[derive(Debug, Clone)]
pub struct ParseSeekError(String);

impl fmt::Display for ParseSeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseSeekError {}

impl SeekPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a token. Blank input is the empty token.
    ///
    /// # Errors
    ///
    /// Returns `ParseSeekError` unless the input is a JSON object whose keys
    /// are non-blank tag names and whose values are strings.
    pub fn from_json(s: &str) -> Result<Self, ParseSeekError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(s).map_err(|e| ParseSeekError(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get(&self, tag: &Tag) -> Option<&str> {
        self.0.get(tag).map(String::as_str)
    }

    pub fn insert(&mut self, tag: Tag, name: impl Into<String>) {
        self.0.insert(tag, name.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Tag, String)> for SeekPositions {
    fn from_iter<I: IntoIterator<Item = (Tag, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
