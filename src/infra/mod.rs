//! Collaborators around the index: header extraction and note body files

mod frontmatter;
mod fs;

pub use frontmatter::{ParseError, ParsedNote, parse};
pub use fs::{FsError, NoteFiles, escape_name};
