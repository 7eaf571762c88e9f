//! Tag names used to index notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tag attached to a note.
///
/// Tags are flat labels and are compared byte-for-byte (no case folding).
/// All whitespace is stripped on construction, mirroring how query terms are
/// read, so that every stored tag is reachable from a query string.
///
/// # Examples
///
/// ```
/// use kasten::domain::Tag;
///
/// let tag = Tag::new(" rust lang ").unwrap();
/// assert_eq!(tag.as_str(), "rustlang");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

/// Error returned when a tag is empty after normalization.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a tag, removing every whitespace character.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if nothing is left after stripping whitespace.
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let normalized: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        if normalized.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        Ok(Self(normalized))
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn new_keeps_plain_tag() {
        let tag = Tag::new("draft").unwrap();
        assert_eq!(tag.as_str(), "draft");
    }

    #[test]
    fn new_rejects_empty_and_whitespace_only() {
        assert!(Tag::new("").is_err());
        assert!(Tag::new(" \t\n").is_err());
    }

    #[test]
    fn strips_inner_whitespace() {
        let tag = Tag::new("needs review").unwrap();
        assert_eq!(tag.as_str(), "needsreview");
    }

    #[test]
    fn case_is_preserved() {
        assert_ne!(Tag::new("Draft").unwrap(), Tag::new("draft").unwrap());
    }

    #[test]
    fn allows_symbols_and_unicode() {
        assert_eq!(Tag::new("c++").unwrap().as_str(), "c++");
        assert_eq!(Tag::new("メモ").unwrap().as_str(), "メモ");
        assert_eq!(Tag::new("path/tag").unwrap().as_str(), "path/tag");
    }

    #[test]
    fn ordering_is_bytewise() {
        let set: BTreeSet<Tag> = ["b", "B", "a"].iter().map(|s| s.parse().unwrap()).collect();
        let ordered: Vec<&str> = set.iter().map(Tag::as_str).collect();
        assert_eq!(ordered, vec!["B", "a", "b"]);
    }

    #[test]
    fn debug_format() {
        let tag = Tag::new("draft").unwrap();
        assert_eq!(format!("{:?}", tag), "Tag(\"draft\")");
    }

    #[test]
    fn deserialize_normalizes() {
        let tag: Tag = serde_json::from_str("\"to do\"").unwrap();
        assert_eq!(tag.as_str(), "todo");
    }

    #[test]
    fn deserialize_rejects_empty() {
        let result: Result<Tag, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
