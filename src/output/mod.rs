//! Report rendering.
//!
//! A [`ScanOutcome`] can be rendered as plain text, JSON or Markdown, either
//! in full or restricted to one section via [`ReportScope`].

mod json;
mod markdown;
mod text;

pub use json::generate_json_string;
pub use markdown::generate_markdown_string;
pub use text::generate_text_string;

use crate::model::ScanOutcome;
use anyhow::Result;

/// ASCII status markers, safe on every terminal.
pub mod status {
    pub const OK: &str = "[OK]";
    pub const WARNING: &str = "[!]";
    pub const ERROR: &str = "[X]";
    pub const INFO: &str = "[i]";
}

/// Output format for scan reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable plain text
    Text,
    /// JSON format for programmatic use
    Json,
    /// Markdown document
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Unknown format: {}. Use 'text', 'json', or 'markdown'",
                s
            )),
        }
    }
}

/// Which part of the outcome a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Summary, conflicts, tools and statistics
    Full,
    /// Summary and conflicts only
    Conflicts,
    /// Summary and statistics only
    Statistics,
}

impl ReportScope {
    pub(crate) fn includes_conflicts(&self) -> bool {
        matches!(self, ReportScope::Full | ReportScope::Conflicts)
    }

    pub(crate) fn includes_statistics(&self) -> bool {
        matches!(self, ReportScope::Full | ReportScope::Statistics)
    }

    pub(crate) fn includes_tools(&self) -> bool {
        matches!(self, ReportScope::Full)
    }
}

/// Format an outcome to a string, for stdout or file output
pub fn format_result_to_string(
    outcome: &ScanOutcome,
    format: OutputFormat,
    scope: ReportScope,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_string(outcome, scope)),
        OutputFormat::Json => generate_json_string(outcome, scope),
        OutputFormat::Markdown => Ok(generate_markdown_string(outcome, scope)),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{DependencyRecord, ScanOutcome, ToolBuilder};

    /// Two tools with a CRITICAL conflict on `requests`, plus an empty tool.
    pub fn sample_outcome() -> ScanOutcome {
        let mut one = ToolBuilder::new("Tool1", "/tools/Tool1").has_requirements_txt(true);
        one.push(DependencyRecord::new("requests", "==2.28.0", "requirements.txt"));
        one.push(DependencyRecord::new("click", "", "requirements.txt"));

        let mut two = ToolBuilder::new("Tool2", "/tools/Tool2").has_setup_py(true);
        two.push(DependencyRecord::new("requests", "==2.31.0", "setup.py"));
        two.record_error("requirements.txt", "Failed to decode");

        let three = ToolBuilder::new("Scripts", "/tools/Scripts").has_requirements_txt(true);

        ScanOutcome::from_tools(vec![one.build(), two.build(), three.build()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_scope_sections() {
        assert!(ReportScope::Full.includes_conflicts());
        assert!(ReportScope::Full.includes_statistics());
        assert!(!ReportScope::Conflicts.includes_statistics());
        assert!(!ReportScope::Statistics.includes_conflicts());
        assert!(!ReportScope::Statistics.includes_tools());
    }

    #[test]
    fn test_format_result_to_string_dispatch() {
        let outcome = fixtures::sample_outcome();

        let text = format_result_to_string(&outcome, OutputFormat::Text, ReportScope::Full).unwrap();
        let json = format_result_to_string(&outcome, OutputFormat::Json, ReportScope::Full).unwrap();
        let md = format_result_to_string(&outcome, OutputFormat::Markdown, ReportScope::Full).unwrap();

        assert!(text.contains("DEPENDENCY SCAN REPORT"));
        assert!(json.trim_start().starts_with('{'));
        assert!(md.starts_with("# Dependency Scan Report"));
    }
}
