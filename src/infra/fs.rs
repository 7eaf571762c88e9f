//! Note body storage on disk with atomic writes.

use std::borrow::Cow;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors during file system operations on note bodies.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("note file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },
}

impl FsError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Escapes a note name into a single safe file name component.
///
/// Everything except ASCII alphanumerics and `-_.~` is percent-encoded, so
/// path separators in a name never create directories.
pub fn escape_name(name: &str) -> Cow<'_, str> {
    urlencoding::encode(name)
}

/// Byte store for raw note content, one `<escaped-name>.md` file per note.
#[derive(Debug, Clone)]
pub struct NoteFiles {
    dir: PathBuf,
}

impl NoteFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file that holds the named note.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.md", escape_name(name)))
    }

    /// Reads a note's raw content.
    ///
    /// # Errors
    ///
    /// Returns `FsError::NotFound` if no note has been written under `name`,
    /// and `FsError::InvalidEncoding` if the file is not UTF-8.
    pub fn read(&self, name: &str) -> Result<String, FsError> {
        let path = self.path_for(name);
        let bytes = std::fs::read(&path).map_err(|e| FsError::from_io(&path, e))?;

        String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
            path,
            encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        })
    }

    /// Writes a note's raw content atomically, replacing any previous content.
    ///
    /// The store directory is created on first use. Content goes to a
    /// temporary file in the same directory and is renamed into place.
    pub fn write(&self, name: &str, content: &str) -> Result<(), FsError> {
        let path = self.path_for(name);

        std::fs::create_dir_all(&self.dir).map_err(|e| FsError::from_io(&self.dir, e))?;

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| FsError::Io {
            path: path.clone(),
            source: e,
        })?;

        temp.write_all(content.as_bytes()).map_err(|e| FsError::Io {
            path: path.clone(),
            source: e,
        })?;

        temp.persist(&path).map_err(|e| FsError::AtomicWrite {
            path: path.clone(),
            source: e.error,
        })?;

        Ok(())
    }
}
