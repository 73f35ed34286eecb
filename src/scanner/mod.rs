//! Tool discovery.
//!
//! A *tool* is an immediate child directory of the scan root that contains at
//! least one manifest (`requirements.txt` or `setup.py`). [`TreeScanner`]
//! finds those directories and parses their manifests into [`ToolRecord`]s.
//!
//! # Example
//!
//! ```no_run
//! use depscan::scanner::TreeScanner;
//!
//! let scanner = TreeScanner::new("/home/me/projects");
//! for tool in scanner.discover_tools()? {
//!     println!("{}: {} dependencies", tool.name, tool.dependencies.len());
//! }
//! # Ok::<(), depscan::ScanError>(())
//! ```

use crate::config::{Config, ExclusionSet};
use crate::error::{Result, ScanError};
use crate::model::{ToolBuilder, ToolRecord};
use crate::parser::{get_parser, ManifestKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds tools directly below a root directory.
///
/// Only immediate children are considered. Children are visited in file name
/// order so results are stable across platforms.
#[derive(Debug, Clone)]
pub struct TreeScanner {
    root: PathBuf,
    exclusions: ExclusionSet,
}

impl TreeScanner {
    /// Creates a scanner using the default exclusion list.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclusions: ExclusionSet::default(),
        }
    }

    /// Creates a scanner using the exclusions from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(root).with_exclusions(config.exclusions.clone())
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Discovers all tools below the root.
    ///
    /// Manifest failures are recorded on the owning tool and never abort the
    /// scan.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootNotFound`] if the root doesn't exist and
    /// [`ScanError::RootNotDirectory`] if it isn't a directory.
    pub fn discover_tools(&self) -> Result<Vec<ToolRecord>> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::RootNotDirectory(self.root.clone()));
        }

        let mut tools = Vec::new();

        let entries = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.exclusions.is_excluded(&name) {
                tracing::debug!("Skipping excluded directory {}", name);
                continue;
            }

            if let Some(tool) = scan_tool(&name, entry.path()) {
                tools.push(tool);
            }
        }

        Ok(tools)
    }
}

/// Builds the record for one directory, or `None` if it has no manifest.
fn scan_tool(name: &str, dir: &Path) -> Option<ToolRecord> {
    let present: Vec<ManifestKind> = ManifestKind::all()
        .into_iter()
        .filter(|kind| dir.join(kind.file_name()).exists())
        .collect();

    if present.is_empty() {
        return None;
    }

    let mut builder = ToolBuilder::new(name, dir)
        .has_requirements_txt(present.contains(&ManifestKind::Requirements))
        .has_setup_py(present.contains(&ManifestKind::SetupPy));

    for kind in present {
        let path = dir.join(kind.file_name());
        match get_parser(kind).parse(&path) {
            Ok(deps) => builder.extend(deps),
            Err(e) => builder.record_error(kind.file_name(), e),
        }
    }

    let tool = builder.build();
    tracing::debug!(
        "Discovered tool {} with {} dependencies",
        tool.name,
        tool.dependencies.len()
    );
    Some(tool)
}
