//! Header extraction: splits a note into its attribute header and body.

use crate::domain::Header;
use thiserror::Error;

/// Result of extracting the header from a note.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNote {
    pub header: Header,
    pub body: String,
}

/// Errors during header extraction.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing closing frontmatter delimiter '{0}'")]
    MissingClosingDelimiter(&'static str),

    #[error("invalid YAML in frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid TOML in frontmatter: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

/// Header syntaxes recognized at the very start of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn delimiter(self) -> &'static str {
        match self {
            Format::Yaml => "---",
            Format::Toml => "+++",
        }
    }
}

/// Extracts the header and body from note content.
///
/// # Format
/// ```text
/// ---
/// tags: [rust, storage]
/// created_at: 2024-01-15T10:30:00Z
/// updated_at: 2024-01-16T09:00:00Z
/// ---
/// Body content here...
/// ```
///
/// A TOML header fenced by `+++` lines is accepted as well. Content that does
/// not open with a delimiter line has no header: it is all body and carries no
/// tags.
///
/// # Errors
///
/// Returns `ParseError` if an opened header is never closed or its contents
/// don't deserialize into the header fields.
pub fn parse(content: &str) -> Result<ParsedNote, ParseError> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

    let Some((format, after_opening)) = opening_delimiter(content) else {
        return Ok(ParsedNote {
            header: Header::default(),
            body: content.to_string(),
        });
    };

    let rest = &content[after_opening..];
    let closing_pos = find_closing_delimiter(rest, format.delimiter())
        .ok_or(ParseError::MissingClosingDelimiter(format.delimiter()))?;

    let raw_header = &rest[..closing_pos];
    let after_closing = &rest[closing_pos + 3..];
    let body = after_closing
        .strip_prefix("\r\n")
        .or_else(|| after_closing.strip_prefix('\n'))
        .unwrap_or(after_closing);

    let header = if raw_header.trim().is_empty() {
        Header::default()
    } else {
        match format {
            Format::Yaml => serde_yaml::from_str(raw_header)?,
            Format::Toml => toml::from_str(raw_header)?,
        }
    };

    Ok(ParsedNote {
        header,
        body: body.to_string(),
    })
}

/// Detects an opening delimiter line and returns the offset just past it.
fn opening_delimiter(content: &str) -> Option<(Format, usize)> {
    [Format::Yaml, Format::Toml].into_iter().find_map(|format| {
        let rest = content.strip_prefix(format.delimiter())?;
        if rest.starts_with("\r\n") {
            Some((format, 5))
        } else if rest.starts_with('\n') {
            Some((format, 4))
        } else {
            None
        }
    })
}

/// Finds the position of a closing delimiter.
///
/// The delimiter must start a line and be followed by a newline or EOF.
fn find_closing_delimiter(content: &str, delimiter: &str) -> Option<usize> {
    let mut pos = 0;

    while pos < content.len() {
        let line = &content[pos..];
        if let Some(after) = line.strip_prefix(delimiter)
            && (after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n"))
        {
            return Some(pos);
        }

        match line.find('\n') {
            Some(offset) => pos += offset + 1,
            None => break,
        }
    }

    None
}
