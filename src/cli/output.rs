//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{NoteAttribute, SeekPositions};
use crate::index::{FilterPage, TagStatsPage};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// One page of `filter` results.
#[derive(Debug, Serialize)]
pub struct FilterListing<'a> {
    pub names: &'a [String],
    pub next_seek: &'a SeekPositions,
    pub exhausted: bool,
}

impl<'a> From<&'a FilterPage> for FilterListing<'a> {
    fn from(page: &'a FilterPage) -> Self {
        Self {
            names: page.names(),
            next_seek: page.next_seek(),
            exhausted: page.is_exhausted(),
        }
    }
}

/// A tag with its note count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    pub count: u64,
}

/// One page of `tags` results.
#[derive(Debug, Serialize)]
pub struct TagStatsListing {
    pub tags: Vec<TagListing>,
    /// Pass as `--seek` to continue; absent on an empty page.
    pub next_seek: Option<String>,
}

impl From<&TagStatsPage> for TagStatsListing {
    fn from(page: &TagStatsPage) -> Self {
        Self {
            tags: page
                .stats()
                .iter()
                .map(|t| TagListing {
                    name: t.tag().to_string(),
                    count: t.count(),
                })
                .collect(),
            next_seek: page.last_key().map(ToString::to_string),
        }
    }
}

/// A note's indexed attributes.
#[derive(Debug, Serialize)]
pub struct AttributeListing {
    pub name: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttributeListing {
    pub fn new(name: &str, attribute: &NoteAttribute) -> Self {
        Self {
            name: name.to_string(),
            tags: attribute.tags().iter().map(ToString::to_string).collect(),
            created_at: attribute.created_at(),
            updated_at: attribute.updated_at(),
        }
    }
}
