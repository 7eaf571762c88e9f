//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{KastenCommand, TestNote};
use kasten::Kasten;
use kasten::kasten::{INDEX_FILE, NOTES_DIR};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary store directory.
///
/// The store lives in `<tmp>/home` and the config directory in
/// `<tmp>/config`; both are removed when the environment is dropped.
pub struct TestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    config_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let home = temp_dir.path().join("home");
        let config_dir = temp_dir.path().join("config");
        Self {
            _temp_dir: temp_dir,
            home,
            config_dir,
        }
    }

    /// Returns the store directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Returns the path of the SQLite index.
    pub fn index_path(&self) -> PathBuf {
        self.home.join(INDEX_FILE)
    }

    /// Returns the directory holding note bodies.
    pub fn notes_dir(&self) -> PathBuf {
        self.home.join(NOTES_DIR)
    }

    /// Opens the store through the library API.
    pub fn kasten(&self) -> Kasten {
        Kasten::open(&self.home).expect("Failed to open store")
    }

    /// Saves a note through the library API.
    pub fn add_note(&self, note: &TestNote) {
        self.kasten()
            .put_note(note.name(), &note.content())
            .expect("Failed to save test note");
    }

    /// Writes `kasten/config.toml` in the isolated config directory.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_dir.join("kasten");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Writes a file next to the store and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self._temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a command configured for this environment's store and config.
    pub fn cmd(&self) -> KastenCommand {
        self.cmd_without_home().home(&self.home)
    }

    /// Creates a command that resolves its store without `--home`.
    pub fn cmd_without_home(&self) -> KastenCommand {
        KastenCommand::new().config_dir(&self.config_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.add_note(&TestNote::new("n").tag("x"));
            env.home().to_path_buf()
        };
        assert!(!path.exists(), "store should be removed on drop");
    }

    #[test]
    fn test_env_add_note_creates_store() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("n").tag("x"));
        assert!(env.index_path().exists());
        assert!(env.notes_dir().join("n.md").exists());
    }
}
