//! Core types: Tag, NoteAttribute, TagDelta, TagQuery, SeekPositions

mod attribute;
mod delta;
mod query;
mod seek;
mod tag;

pub use attribute::{Header, NoteAttribute};
pub use delta::TagDelta;
pub use query::TagQuery;
pub use seek::{ParseSeekError, SeekPositions};
pub use tag::{ParseTagError, Tag};
