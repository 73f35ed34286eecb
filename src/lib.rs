//! Scan a directory of tools for Python dependencies and flag version
//! conflicts between them.
//!
//! ```no_run
//! use depscan::{scan, TreeScanner};
//!
//! let outcome = scan(&TreeScanner::new("/home/me/projects"))?;
//! for conflict in &outcome.conflicts {
//!     println!("{} ({})", conflict.package_name, conflict.severity);
//! }
//! # Ok::<(), depscan::ScanError>(())
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod scanner;
pub mod stats;

pub use config::Config;
pub use error::ScanError;
pub use model::{ConflictRecord, DependencyRecord, ScanOutcome, Severity, ToolRecord};
pub use scanner::TreeScanner;

/// Discovers tools with `scanner`, then detects conflicts and computes statistics.
///
/// # Errors
///
/// Fails only if the scan root is missing or not a directory.
pub fn scan(scanner: &TreeScanner) -> error::Result<ScanOutcome> {
    let tools = scanner.discover_tools()?;
    Ok(ScanOutcome::from_tools(tools))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_requirements(root: &std::path::Path, tool: &str, content: &str) {
        let dir = root.join(tool);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("requirements.txt"), content).unwrap();
    }

    #[test]
    fn test_scan_empty_root() {
        let root = TempDir::new().unwrap();
        let outcome = scan(&TreeScanner::new(root.path())).unwrap();

        assert_eq!(outcome.tool_count, 0);
        assert_eq!(outcome.total_dependency_count, 0);
        assert!(outcome.conflicts.is_empty());
    }

    #[test]
    fn test_scan_end_to_end() {
        let root = TempDir::new().unwrap();
        write_requirements(
            root.path(),
            "alpha",
            "requests==2.28.0\nclick>=8.0\ngit+https://github.com/org/shared.git\n",
        );
        write_requirements(root.path(), "beta", "Requests==2.31.0\nclick>=8.1\n-e .\n");
        write_requirements(root.path(), "gamma", "");

        let outcome = scan(&TreeScanner::new(root.path())).unwrap();

        assert_eq!(outcome.tool_count, 3);
        assert_eq!(outcome.total_dependency_count, 5);
        assert_eq!(outcome.conflicts.len(), 2);
        assert_eq!(outcome.conflicts[0].package_name, "requests");
        assert_eq!(outcome.conflicts[0].severity, Severity::Critical);
        assert_eq!(outcome.conflicts[1].package_name, "click");
        assert_eq!(outcome.conflicts[1].severity, Severity::Warning);
        assert_eq!(outcome.statistics.stdlib_only_tools, vec!["gamma"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let root = TempDir::new().unwrap();
        let result = scan(&TreeScanner::new(root.path().join("missing")));
        assert!(matches!(result, Err(ScanError::RootNotFound(_))));
    }
}
