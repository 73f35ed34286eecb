use super::ReportScope;
use crate::model::ScanOutcome;
use anyhow::Result;

/// Generate the JSON report. Restricted scopes emit just that section.
pub fn generate_json_string(outcome: &ScanOutcome, scope: ReportScope) -> Result<String> {
    let json = match scope {
        ReportScope::Full => serde_json::to_string_pretty(outcome)?,
        ReportScope::Conflicts => serde_json::to_string_pretty(&outcome.conflicts)?,
        ReportScope::Statistics => serde_json::to_string_pretty(&outcome.statistics)?,
    };
    Ok(json)
}
