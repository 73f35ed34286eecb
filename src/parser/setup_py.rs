use super::{parse_requirement, read_manifest, ManifestKind, ManifestParser};
use crate::error::Result;
use crate::model::DependencyRecord;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// Text scraping only: the first `]` closes the list, so nested brackets
// inside `install_requires` truncate it.
static INSTALL_REQUIRES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)install_requires\s*=\s*\[(.*?)\]").unwrap());

static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).unwrap());

/// Best-effort extraction of `install_requires` from a `setup.py` script.
///
/// Never fails: unreadable files are logged and treated as declaring nothing.
pub struct SetupPyParser;

impl ManifestParser for SetupPyParser {
    fn kind(&self) -> ManifestKind {
        ManifestKind::SetupPy
    }

    fn parse_str(&self, content: &str, source: &Path) -> Vec<DependencyRecord> {
        let Some(caps) = INSTALL_REQUIRES_RE.captures(content) else {
            return Vec::new();
        };
        let Some(list) = caps.get(1) else {
            return Vec::new();
        };

        QUOTED_RE
            .captures_iter(list.as_str())
            .filter_map(|c| c.get(1))
            .filter_map(|spec| parse_requirement(spec.as_str(), source))
            .collect()
    }

    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>> {
        match read_manifest(path) {
            Ok(content) => Ok(self.parse_str(&content, path)),
            Err(e) => {
                tracing::warn!("Could not parse {}: {}", path.display(), e);
                Ok(Vec::new())
            }
        }
    }
}
