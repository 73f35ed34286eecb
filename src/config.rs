//! Configuration file handling.
//!
//! This module provides loading and saving of depscan configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/depscan/config.toml`
//! - macOS: `~/Library/Application Support/depscan/config.toml`
//! - Windows: `%APPDATA%\depscan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_root = "/home/me/projects"
//! default_format = "text"
//! exclusions = [".git", "node_modules", "__pycache__", "venv", ".venv", "build-*"]
//! ```

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Directory names skipped by default when looking for tools.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[".git", "node_modules", "__pycache__", "venv", ".venv"];

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use depscan::Config;
///
/// // Load from file (or use defaults if file doesn't exist)
/// let config = Config::load().unwrap();
///
/// println!("Default format: {}", config.default_format);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned when no `--path` flag is provided.
    ///
    /// Default: the current directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_root: Option<PathBuf>,

    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "text", "json", "markdown"
    /// Default: "text"
    pub default_format: String,

    /// Directory names that are never treated as tools.
    pub exclusions: ExclusionSet,
}

/// Directory names to skip while scanning.
///
/// Entries match a directory name exactly, or as a pattern when they contain
/// `*` (e.g. `build-*`, `*.egg-info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet {
    patterns: Vec<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a directory should be skipped.
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.patterns.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, dir_name)
            } else {
                pattern == dir_name
            }
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    let first = parts[0];
    if !first.is_empty() {
        match remaining.strip_prefix(first) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    let last = parts[parts.len() - 1];
    if !last.is_empty() {
        match remaining.strip_suffix(last) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_root: None,
            default_format: "text".to_string(),
            exclusions: ExclusionSet::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ScanError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&content).map_err(|e| ScanError::Config {
            path,
            message: e.to_string(),
        })
    }

    /// Parses configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depscan")
            .join("config.toml")
    }

    /// Returns the root to scan: the configured one, or the current directory.
    pub fn root(&self) -> PathBuf {
        self.default_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
