use super::{status, ReportScope};
use crate::model::{ScanOutcome, Severity, ToolRecord};
use tabled::{settings::Style, Table, Tabled};

const WIDTH: usize = 80;

#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "Tool")]
    name: String,
    #[tabled(rename = "Deps")]
    dependencies: usize,
    #[tabled(rename = "Manifests")]
    manifests: String,
    #[tabled(rename = "Errors")]
    errors: usize,
}

impl From<&ToolRecord> for ToolRow {
    fn from(tool: &ToolRecord) -> Self {
        let mut manifests = Vec::new();
        if tool.has_requirements_txt {
            manifests.push("requirements.txt");
        }
        if tool.has_setup_py {
            manifests.push("setup.py");
        }

        ToolRow {
            name: truncate(&tool.name, 40),
            dependencies: tool.registry_dependency_count(),
            manifests: manifests.join(", "),
            errors: tool.parse_errors.len(),
        }
    }
}

/// Generate the plain text report
pub fn generate_text_string(outcome: &ScanOutcome, scope: ReportScope) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(rule());
    lines.push(format!("{:^width$}", "DEPENDENCY SCAN REPORT", width = WIDTH));
    lines.push(rule());
    lines.push(String::new());
    lines.push(format!("Date: {}", outcome.timestamp.to_rfc3339()));
    lines.push(format!("Tools Scanned: {}", outcome.tool_count));
    lines.push(format!("Total Dependencies: {}", outcome.total_dependency_count));
    lines.push(format!("Unique Packages: {}", outcome.unique_package_count));
    lines.push(format!("Conflicts Found: {}", outcome.conflicts.len()));
    lines.push(String::new());

    if scope.includes_conflicts() && !outcome.conflicts.is_empty() {
        push_heading(&mut lines, "CONFLICTS");

        for conflict in &outcome.conflicts {
            let prefix = match conflict.severity {
                Severity::Critical => status::ERROR,
                Severity::Warning => status::WARNING,
            };
            lines.push(format!(
                "{} {} ({})",
                prefix, conflict.package_name, conflict.severity
            ));
            for (tool, constraint) in conflict.tools.iter() {
                lines.push(format!("  - {}: {}", tool, display_constraint(constraint)));
            }
            lines.push(String::new());
        }
    }

    if scope.includes_tools() && !outcome.tools.is_empty() {
        push_heading(&mut lines, "TOOLS");

        let rows: Vec<ToolRow> = outcome.tools.iter().map(ToolRow::from).collect();
        lines.push(Table::new(rows).with(Style::ascii()).to_string());
        lines.push(String::new());

        let failing: Vec<&ToolRecord> = outcome
            .tools
            .iter()
            .filter(|t| !t.parse_errors.is_empty())
            .collect();
        if !failing.is_empty() {
            lines.push("Parse Errors:".to_string());
            for tool in failing {
                for error in &tool.parse_errors {
                    lines.push(format!("  {} {}: {}", status::ERROR, tool.name, error));
                }
            }
            lines.push(String::new());
        }
    }

    if scope.includes_statistics() {
        push_heading(&mut lines, "STATISTICS");

        let stats = &outcome.statistics;
        lines.push(format!("Stdlib-Only Tools: {}", stats.stdlib_only_tools.len()));
        lines.push(format!("Light Tools (1-3 deps): {}", stats.light_tools.len()));
        lines.push(format!("Heavy Tools (10+ deps): {}", stats.heavy_tools.len()));
        lines.push(String::new());

        lines.push("Most Popular Packages:".to_string());
        for usage in &stats.most_popular_packages {
            lines.push(format!("  {:>3}x  {}", usage.tool_count, usage.package_name));
        }
        lines.push(String::new());

        if !stats.fragmented_packages.is_empty() {
            lines.push("Fragmented Packages (3+ constraints):".to_string());
            for pkg in &stats.fragmented_packages {
                let constraints: Vec<String> = pkg
                    .constraints
                    .keys()
                    .map(|c| display_constraint(c).to_string())
                    .collect();
                lines.push(format!("  {}: {}", pkg.package_name, constraints.join(" | ")));
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn rule() -> String {
    "=".repeat(WIDTH)
}

fn push_heading(lines: &mut Vec<String>, title: &str) {
    lines.push(rule());
    lines.push(title.to_string());
    lines.push(rule());
    lines.push(String::new());
}

fn display_constraint(constraint: &str) -> &str {
    if constraint.is_empty() {
        "(any version)"
    } else {
        constraint
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
