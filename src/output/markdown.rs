//! Markdown report output format.
//!
//! Suitable for pasting into issues, wikis or pull request descriptions.

use super::ReportScope;
use crate::model::ScanOutcome;

/// Generate the Markdown report
pub fn generate_markdown_string(outcome: &ScanOutcome, scope: ReportScope) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Dependency Scan Report".to_string());
    lines.push(String::new());
    lines.push(format!("**Date:** {}", outcome.timestamp.to_rfc3339()));
    lines.push(format!("**Tools Scanned:** {}", outcome.tool_count));
    lines.push(format!(
        "**Total Dependencies:** {}",
        outcome.total_dependency_count
    ));
    lines.push(format!("**Unique Packages:** {}", outcome.unique_package_count));
    lines.push(format!("**Conflicts Found:** {}", outcome.conflicts.len()));
    lines.push(String::new());

    if scope.includes_conflicts() && !outcome.conflicts.is_empty() {
        lines.push("## Conflicts".to_string());
        lines.push(String::new());

        for conflict in &outcome.conflicts {
            lines.push(format!(
                "### {} ({})",
                conflict.package_name, conflict.severity
            ));
            lines.push(String::new());
            for (tool, constraint) in conflict.tools.iter() {
                let shown = if constraint.is_empty() {
                    "any version"
                } else {
                    constraint.as_str()
                };
                lines.push(format!("- **{}**: `{}`", tool, shown));
            }
            lines.push(String::new());
        }
    }

    if scope.includes_tools() && !outcome.tools.is_empty() {
        lines.push("## Tools".to_string());
        lines.push(String::new());
        lines.push("| Tool | Dependencies | Parse Errors |".to_string());
        lines.push("|------|--------------|--------------|".to_string());
        for tool in &outcome.tools {
            lines.push(format!(
                "| {} | {} | {} |",
                escape_cell(&tool.name),
                tool.registry_dependency_count(),
                tool.parse_errors.len()
            ));
        }
        lines.push(String::new());
    }

    if scope.includes_statistics() {
        let stats = &outcome.statistics;

        lines.push("## Statistics".to_string());
        lines.push(String::new());
        lines.push(format!(
            "- **Stdlib-Only Tools:** {}",
            stats.stdlib_only_tools.len()
        ));
        lines.push(format!(
            "- **Light Tools (1-3 deps):** {}",
            stats.light_tools.len()
        ));
        lines.push(format!(
            "- **Heavy Tools (10+ deps):** {}",
            stats.heavy_tools.len()
        ));
        lines.push(String::new());

        lines.push("### Most Popular Packages".to_string());
        lines.push(String::new());
        for usage in &stats.most_popular_packages {
            lines.push(format!(
                "- **{}**: {} tools",
                usage.package_name, usage.tool_count
            ));
        }
        lines.push(String::new());

        if !stats.fragmented_packages.is_empty() {
            lines.push("### Fragmented Packages".to_string());
            lines.push(String::new());
            for pkg in &stats.fragmented_packages {
                let constraints: Vec<String> = pkg
                    .constraints
                    .keys()
                    .map(|c| {
                        if c.is_empty() {
                            "`any version`".to_string()
                        } else {
                            format!("`{}`", c)
                        }
                    })
                    .collect();
                lines.push(format!("- **{}**: {}", pkg.package_name, constraints.join(", ")));
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_outcome;

    #[test]
    fn test_generate_markdown_report() {
        let report = generate_markdown_string(&sample_outcome(), ReportScope::Full);

        assert!(report.contains("# Dependency Scan Report"));
        assert!(report.contains("**Tools Scanned:** 3"));
        assert!(report.contains("## Conflicts"));
        assert!(report.contains("### requests (CRITICAL)"));
        assert!(report.contains("- **Tool1**: `==2.28.0`"));
        assert!(report.contains("| Tool2 | 1 | 1 |"));
        assert!(report.contains("- **requests**: 2 tools"));
    }

    #[test]
    fn test_statistics_scope() {
        let report = generate_markdown_string(&sample_outcome(), ReportScope::Statistics);

        assert!(!report.contains("## Conflicts"));
        assert!(!report.contains("## Tools"));
        assert!(report.contains("## Statistics"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }
}
