//! Project configuration file support for gitscope.
//!
//! Loads configuration from `gitscope.toml` in the repository directory,
//! falling back to the user config directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration loaded from `gitscope.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Commits fetched per history page
    pub page_size: Option<usize>,
    /// Walk all local branches rather than just HEAD
    pub all_branches: Option<bool>,
    /// Graph appearance
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Appearance settings for the rendered graph
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    /// Lane color cycle as hex strings; empty means the built-in palette
    #[serde(default)]
    pub colors: Vec<String>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "gitscope.toml";

/// Commits per page when neither CLI nor config says otherwise
pub const DEFAULT_PAGE_SIZE: usize = 200;

impl ProjectConfig {
    /// Load configuration from the given directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if the file exists and parses successfully
    /// - `Ok(None)` if the file does not exist
    /// - `Err(...)` if the file exists but fails to parse (hard error)
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Load from the repository directory, falling back to the user config
    /// directory (`<config>/gitscope/gitscope.toml`).
    pub fn load_with_fallback(repo_dir: &Path) -> Result<Self> {
        if let Some(config) = Self::load(repo_dir)? {
            return Ok(config);
        }
        if let Some(user_dir) = user_config_dir() {
            if let Some(config) = Self::load(&user_dir)? {
                return Ok(config);
            }
        }
        Ok(Self::default())
    }

    /// Effective page size. Priority: CLI flag > config > default
    pub fn effective_page_size(&self, cli: Option<usize>) -> usize {
        cli.or(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Effective branch scope. A CLI `--head-only` always wins.
    pub fn effective_all_branches(&self, head_only: bool) -> bool {
        if head_only {
            return false;
        }
        self.all_branches.unwrap_or(true)
    }
}

fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gitscope"))
}
