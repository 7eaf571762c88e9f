//! Builder for note content with a header block.

#![allow(dead_code)]

use chrono::{DateTime, Utc};

/// Header syntax used when rendering a [`TestNote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    Yaml,
    Toml,
    None,
}

/// Builder for creating note content with sensible defaults.
///
/// Renders a YAML header with the configured tags and timestamps, followed
/// by the body.
#[derive(Debug, Clone)]
pub struct TestNote {
    name: String,
    tags: Vec<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    body: String,
    style: HeaderStyle,
}

impl TestNote {
    /// Creates a new test note with the given name and no tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
            body: String::new(),
            style: HeaderStyle::Yaml,
        }
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn created_at(mut self, ts: &str) -> Self {
        self.created_at = Some(parse_ts(ts));
        self
    }

    pub fn updated_at(mut self, ts: &str) -> Self {
        self.updated_at = Some(parse_ts(ts));
        self
    }

    /// Sets the body content.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Renders the header as TOML between `+++` lines.
    pub fn toml(mut self) -> Self {
        self.style = HeaderStyle::Toml;
        self
    }

    /// Renders the body only, with no header block.
    pub fn headerless(mut self) -> Self {
        self.style = HeaderStyle::None;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the full note content as it would be saved.
    pub fn content(&self) -> String {
        match self.style {
            HeaderStyle::None => self.body.clone(),
            HeaderStyle::Yaml => {
                let mut out = String::from("---\n");
                out.push_str(&format!("tags: [{}]\n", self.tags.join(", ")));
                if let Some(ts) = self.created_at {
                    out.push_str(&format!("created_at: {}\n", ts.to_rfc3339()));
                }
                if let Some(ts) = self.updated_at {
                    out.push_str(&format!("updated_at: {}\n", ts.to_rfc3339()));
                }
                out.push_str("---\n");
                out.push_str(&self.body);
                out
            }
            HeaderStyle::Toml => {
                let quoted: Vec<String> = self.tags.iter().map(|t| format!("{:?}", t)).collect();
                let mut out = String::from("+++\n");
                out.push_str(&format!("tags = [{}]\n", quoted.join(", ")));
                if let Some(ts) = self.created_at {
                    out.push_str(&format!("created_at = \"{}\"\n", ts.to_rfc3339()));
                }
                if let Some(ts) = self.updated_at {
                    out.push_str(&format!("updated_at = \"{}\"\n", ts.to_rfc3339()));
                }
                out.push_str("+++\n");
                out.push_str(&self.body);
                out
            }
        }
    }
}

fn parse_ts(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ts)
        .expect("Invalid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_renders_yaml_header() {
        let note = TestNote::new("n").tag("rust").tag("cli").body("Body\n");
        assert_eq!(note.content(), "---\ntags: [rust, cli]\n---\nBody\n");
    }

    #[test]
    fn test_note_renders_timestamps() {
        let note = TestNote::new("n").created_at("2024-01-15T10:30:00Z");
        assert!(note.content().contains("created_at: 2024-01-15T10:30:00+00:00\n"));
    }

    #[test]
    fn test_note_renders_toml_header() {
        let note = TestNote::new("n").tag("a").toml();
        assert_eq!(note.content(), "+++\ntags = [\"a\"]\n+++\n");
    }

    #[test]
    fn test_note_headerless_is_body_only() {
        let note = TestNote::new("n").tag("ignored").body("plain").headerless();
        assert_eq!(note.content(), "plain");
    }
}
