//! Fluent wrapper around assert_cmd::Command.

#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `kasten` binary.
///
/// Commands run with `KASTEN_HOME` and `KASTEN_LOG` cleared and the config
/// directory pointed at an isolated location, so the developer's own store
/// and config never leak into a test.
pub struct KastenCommand {
    args: Vec<String>,
    stdin: Option<String>,
    config_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl KastenCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
            config_dir: None,
            env: Vec::new(),
        }
    }

    /// Sets the `--home` option to specify the store directory.
    pub fn home(mut self, path: &Path) -> Self {
        self.args.push("--home".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Uses `dir` as the config directory (`$XDG_CONFIG_HOME`).
    pub fn config_dir(mut self, dir: &Path) -> Self {
        self.config_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.env.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `content` to the command's stdin.
    pub fn stdin(mut self, content: impl Into<String>) -> Self {
        self.stdin = Some(content.into());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("kasten").expect("Failed to find kasten binary");
        cmd.env_remove("KASTEN_HOME").env_remove("KASTEN_LOG");
        let config_dir = self
            .config_dir
            .unwrap_or_else(|| std::env::temp_dir().join("kasten-test-no-config"));
        cmd.env("XDG_CONFIG_HOME", config_dir);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.args(&self.args);
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `put` command, reading `content` from stdin.
    pub fn put(self, name: &str, content: &str) -> Self {
        self.args(["put", name]).stdin(content)
    }

    /// Configures for the `read` command.
    pub fn read(self, name: &str) -> Self {
        self.args(["read", name])
    }

    /// Configures for the `filter` command with a query.
    pub fn filter(self, query: &str) -> Self {
        self.args(["filter", query])
    }

    /// Configures for the `tags` command.
    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    /// Configures for the `attr` command.
    pub fn attr(self, name: &str) -> Self {
        self.args(["attr", name])
    }

    /// Configures for the `check` command.
    pub fn check(self) -> Self {
        self.args(["check"])
    }

    // ===========================================
    // Options
    // ===========================================

    pub fn seek(self, token: &str) -> Self {
        self.args(["--seek", token])
    }

    pub fn max(self, max: usize) -> Self {
        self.args(["--max".to_string(), max.to_string()])
    }

    pub fn limit(self, limit: usize) -> Self {
        self.args(["--limit".to_string(), limit.to_string()])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for KastenCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        KastenCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_home() {
        let temp = TempDir::new().unwrap();
        let cmd = KastenCommand::new().home(temp.path());
        let args = cmd.get_args();
        assert_eq!(args[0], "--home");
        assert_eq!(args[1], temp.path().to_string_lossy());
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = KastenCommand::new().filter("a & b").max(3).format_json();
        let args = cmd.get_args();
        assert_eq!(args, ["filter", "a & b", "--max", "3", "--format", "json"]);
    }
}
