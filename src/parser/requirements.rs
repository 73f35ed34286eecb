use super::{parse_requirement, read_manifest, ManifestKind, ManifestParser};
use crate::error::Result;
use crate::model::DependencyRecord;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static EDITABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-e\s+|--editable(?:\s+|=))").unwrap());

static VCS_URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^git\+https?://").unwrap());

/// Parser for the line-oriented `requirements.txt` format.
pub struct RequirementsParser;

impl ManifestParser for RequirementsParser {
    fn kind(&self) -> ManifestKind {
        ManifestKind::Requirements
    }

    fn parse_str(&self, content: &str, source: &Path) -> Vec<DependencyRecord> {
        content
            .lines()
            .filter_map(|line| parse_line(line, source))
            .collect()
    }

    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>> {
        let content = read_manifest(path).inspect_err(|e| {
            tracing::error!("Error parsing {}: {}", path.display(), e);
        })?;
        Ok(self.parse_str(&content, path))
    }
}

fn parse_line(raw: &str, source: &Path) -> Option<DependencyRecord> {
    let line = raw.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return None;
    }

    let (line, is_editable) = match EDITABLE_RE.find(line) {
        Some(marker) => (line[marker.end()..].trim(), true),
        None => (line, false),
    };

    if VCS_URL_RE.is_match(line) {
        return Some(DependencyRecord::vcs(&vcs_package_name(line), source).editable(is_editable));
    }

    if is_editable && line == "." {
        return Some(DependencyRecord::local_editable(source));
    }

    parse_requirement(line, source).map(|dep| dep.editable(is_editable))
}

/// Derives a package name from the last path segment of a VCS URL.
fn vcs_package_name(url: &str) -> String {
    let segment = url
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(url);
    let segment = segment.split('@').next().unwrap_or(segment);
    segment.strip_suffix(".git").unwrap_or(segment).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<DependencyRecord> {
        RequirementsParser.parse_str(content, Path::new("requirements.txt"))
    }

    #[test]
    fn test_parse_simple_requirement() {
        let deps = parse("requests==2.28.0\n");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].package_name, "requests");
        assert_eq!(deps[0].version_constraint, "==2.28.0");
        assert!(!deps[0].is_editable);
        assert!(!deps[0].is_vcs_reference);
    }

    #[test]
    fn test_parse_version_range() {
        let deps = parse("click>=7.0,<9.0\n");
        assert_eq!(deps[0].package_name, "click");
        assert_eq!(deps[0].version_constraint, ">=7.0,<9.0");
    }

    #[test]
    fn test_parse_with_extras() {
        let deps = parse("requests[security]>=2.28.0\n");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].package_name, "requests");
        assert_eq!(deps[0].extras, vec!["security"]);
        assert_eq!(deps[0].version_constraint, ">=2.28.0");
    }

    #[test]
    fn test_parse_git_url() {
        let deps = parse("git+https://github.com/user/Cool_Repo.git\n");
        assert_eq!(deps.len(), 1);
        assert!(deps[0].is_vcs_reference);
        assert_eq!(deps[0].package_name, "cool-repo");
        assert_eq!(deps[0].version_constraint, "git");
    }

    #[test]
    fn test_parse_git_url_with_ref_and_egg() {
        let deps = parse("git+https://github.com/user/tool.git@v1.2#egg=tool\n");
        assert_eq!(deps[0].package_name, "tool");
        assert!(deps[0].is_vcs_reference);
    }

    #[test]
    fn test_parse_git_url_trailing_slash() {
        let deps = parse("git+https://github.com/org/repo/\n");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].package_name, "repo");
        assert!(deps[0].is_vcs_reference);
    }

    #[test]
    fn test_parse_editable_git_url() {
        let deps = parse("-e git+http://example.com/org/thing.git\n");
        assert!(deps[0].is_vcs_reference);
        assert!(deps[0].is_editable);
        assert_eq!(deps[0].package_name, "thing");
    }

    #[test]
    fn test_parse_editable_self() {
        let deps = parse("-e .\n");
        assert_eq!(deps.len(), 1);
        assert!(deps[0].is_editable);
        assert_eq!(deps[0].package_name, "local-editable");
        assert_eq!(deps[0].version_constraint, "");
    }

    #[test]
    fn test_parse_editable_long_form() {
        let deps = parse("--editable=.\n--editable mylib>=1.0\n");
        assert_eq!(deps.len(), 2);
        assert!(deps[0].is_local_editable());
        assert_eq!(deps[1].package_name, "mylib");
        assert!(deps[1].is_editable);
    }

    #[test]
    fn test_parse_comments() {
        let deps = parse("# header comment\nrequests==2.28.0  # pinned\n   # indented\n");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].package_name, "requests");
        assert_eq!(deps[0].version_constraint, "==2.28.0");
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn test_malformed_lines_dropped() {
        let deps = parse("./vendor/pkg.whl\n=>1.0\nrequests\n");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].package_name, "requests");
    }

    #[test]
    fn test_option_lines_match_grammar() {
        let deps = parse("-r base.txt\nrequests\n");
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].package_name, "-r");
        assert_eq!(deps[0].version_constraint, "");
        assert!(!deps[0].is_editable);
    }

    #[test]
    fn test_records_source_path() {
        let deps = RequirementsParser.parse_str("flask\n", Path::new("/tools/a/requirements.txt"));
        assert_eq!(deps[0].source_path, Path::new("/tools/a/requirements.txt"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let content = "requests[security]>=2.28.0\n-e .\ngit+https://x.org/a/b.git\nclick\n";
        assert_eq!(parse(content), parse(content));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.txt");
        std::fs::write(&path, "requests>=2.0\nclick\n").unwrap();

        let deps = RequirementsParser.parse(&path).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[1].source_path, path);
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RequirementsParser.parse(&dir.path().join("requirements.txt"));
        assert!(matches!(
            result,
            Err(crate::error::ScanError::ManifestNotFound(_))
        ));
    }
}
