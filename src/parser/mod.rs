//! Manifest parsers.
//!
//! This module provides the [`ManifestParser`] trait and one implementation
//! per supported manifest file.
//!
//! | Parser | File | Failure policy |
//! |--------|------|----------------|
//! | [`RequirementsParser`] | `requirements.txt` | read errors are returned |
//! | [`SetupPyParser`] | `setup.py` | everything downgrades to "no dependencies" |
//!
//! # Example
//!
//! ```
//! use depscan::parser::{ManifestParser, RequirementsParser};
//! use std::path::Path;
//!
//! let deps = RequirementsParser.parse_str(
//!     "requests[security]>=2.28.0  # http\n-e .\n",
//!     Path::new("requirements.txt"),
//! );
//!
//! assert_eq!(deps[0].package_name, "requests");
//! assert_eq!(deps[0].extras, vec!["security"]);
//! assert_eq!(deps[0].version_constraint, ">=2.28.0");
//! assert!(deps[1].is_local_editable());
//! ```

mod requirements;
mod setup_py;

pub use requirements::RequirementsParser;
pub use setup_py::SetupPyParser;

use crate::error::{Result, ScanError};
use crate::model::DependencyRecord;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

/// Name, optional `[extras]`, optional constraint. Anchored at the start only:
/// anything after the constraint (markers, hashes) is ignored.
static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_-]+)(?:\[([a-zA-Z0-9_,-]+)\])?([><=!~]+[0-9a-zA-Z.,<>= *]+)?")
        .unwrap()
});

/// The manifest file types a tool directory may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    Requirements,
    SetupPy,
}

impl ManifestKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::Requirements => "requirements.txt",
            ManifestKind::SetupPy => "setup.py",
        }
    }

    /// Every manifest kind, in the order a tool's manifests are parsed.
    pub fn all() -> [ManifestKind; 2] {
        [ManifestKind::Requirements, ManifestKind::SetupPy]
    }
}

impl std::fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Trait for turning one kind of manifest into dependency records.
pub trait ManifestParser: Send + Sync {
    /// The manifest kind this parser handles.
    fn kind(&self) -> ManifestKind;

    /// Extracts dependencies from manifest text.
    ///
    /// `source` is recorded on every returned record.
    fn parse_str(&self, content: &str, source: &Path) -> Vec<DependencyRecord>;

    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ManifestNotFound`] if the file is missing, or a
    /// read/decode error if it cannot be loaded as UTF-8 text.
    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>> {
        let content = read_manifest(path)?;
        Ok(self.parse_str(&content, path))
    }
}

/// Returns the parser for a specific manifest kind.
pub fn get_parser(kind: ManifestKind) -> Box<dyn ManifestParser> {
    match kind {
        ManifestKind::Requirements => Box::new(RequirementsParser),
        ManifestKind::SetupPy => Box::new(SetupPyParser),
    }
}

/// Reads a manifest as UTF-8, mapping a missing file to its own error.
pub(crate) fn read_manifest(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ScanError::ManifestNotFound(path.to_path_buf()),
        _ => ScanError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    String::from_utf8(bytes).map_err(|source| ScanError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies the requirement grammar to a single specification.
///
/// Returns `None` when the text does not start with a name. The grammar is
/// lenient: pip option lines such as `-r base.txt` match it like any other
/// name and are kept.
pub fn parse_requirement(spec: &str, source: &Path) -> Option<DependencyRecord> {
    let caps = REQUIREMENT_RE.captures(spec)?;
    let name = caps.get(1)?.as_str();
    let extras = caps
        .get(2)
        .map(|m| {
            m.as_str()
                .split(',')
                .map(|e| e.trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    let constraint = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    Some(DependencyRecord::new(name, constraint, source).with_extras(extras))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src() -> &'static Path {
        Path::new("requirements.txt")
    }

    #[test]
    fn test_parse_requirement_name_only() {
        let dep = parse_requirement("requests", src()).unwrap();
        assert_eq!(dep.package_name, "requests");
        assert_eq!(dep.version_constraint, "");
        assert!(dep.extras.is_empty());
    }

    #[test]
    fn test_parse_requirement_with_extras_and_range() {
        let dep = parse_requirement("Requests_Lib[security,socks]>=2.0,<3.0", src()).unwrap();
        assert_eq!(dep.package_name, "requests-lib");
        assert_eq!(dep.extras, vec!["security", "socks"]);
        assert_eq!(dep.version_constraint, ">=2.0,<3.0");
    }

    #[test]
    fn test_parse_requirement_stops_at_marker() {
        let dep = parse_requirement("pywin32>=300; sys_platform == 'win32'", src()).unwrap();
        assert_eq!(dep.version_constraint, ">=300");
    }

    #[test]
    fn test_parse_requirement_wildcard() {
        let dep = parse_requirement("django==4.*", src()).unwrap();
        assert_eq!(dep.version_constraint, "==4.*");
    }

    #[test]
    fn test_parse_requirement_rejects_non_names() {
        assert!(parse_requirement("./local/path", src()).is_none());
        assert!(parse_requirement("[extra]>=1.0", src()).is_none());
    }

    #[test]
    fn test_parse_requirement_keeps_option_lines() {
        let dep = parse_requirement("-r base.txt", src()).unwrap();
        assert_eq!(dep.package_name, "-r");
        assert_eq!(dep.version_constraint, "");

        let dep = parse_requirement("--index-url https://example.com", src()).unwrap();
        assert_eq!(dep.package_name, "--index-url");
    }

    #[test]
    fn test_read_manifest_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_manifest(&dir.path().join("requirements.txt")).unwrap_err();
        assert!(matches!(err, ScanError::ManifestNotFound(_)));
    }

    #[test]
    fn test_read_manifest_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.txt");
        std::fs::write(&path, [0x66u8, 0x6f, 0xff, 0xfe]).unwrap();

        let err = read_manifest(&path).unwrap_err();
        assert!(matches!(err, ScanError::Decode { .. }));
    }

    #[test]
    fn test_manifest_kind_order() {
        let names: Vec<_> = ManifestKind::all().iter().map(|k| k.file_name()).collect();
        assert_eq!(names, vec!["requirements.txt", "setup.py"]);
    }
}
