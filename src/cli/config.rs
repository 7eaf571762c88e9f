//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the store directory.
pub const HOME_ENV: &str = "KASTEN_HOME";

/// Default bound on filter cursor rounds.
pub const DEFAULT_FILTER_MAX: usize = 100;

/// Default number of tags per stats page.
pub const DEFAULT_STATS_LIMIT: usize = 100;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store directory
    pub home: Option<PathBuf>,

    /// Cursor rounds per `filter` call
    pub filter_max: Option<usize>,

    /// Tags per `tags` call
    pub stats_limit: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/kasten/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kasten")
            .join("config.toml")
    }

    /// Resolve the store directory.
    ///
    /// Precedence order:
    /// 1. CLI `--home` argument
    /// 2. `KASTEN_HOME` environment variable
    /// 3. Config file `home` setting
    /// 4. `~/.kasten`
    pub fn home_dir(&self, cli_home: Option<&PathBuf>) -> PathBuf {
        let env_home = std::env::var_os(HOME_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_home(cli_home, env_home)
    }

    fn resolve_home(&self, cli_home: Option<&PathBuf>, env_home: Option<PathBuf>) -> PathBuf {
        cli_home
            .cloned()
            .or(env_home)
            .or_else(|| self.home.clone())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".kasten")
            })
    }

    pub fn filter_max(&self) -> usize {
        self.filter_max.unwrap_or(DEFAULT_FILTER_MAX)
    }

    pub fn stats_limit(&self) -> usize {
        self.stats_limit.unwrap_or(DEFAULT_STATS_LIMIT)
    }
}
