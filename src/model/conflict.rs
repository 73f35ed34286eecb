use super::OrderedMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Tools pin different exact versions.
    Critical,
    /// Tools disagree, but may still be satisfiable together.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A package whose version constraints differ between tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictRecord {
    pub package_name: String,
    pub severity: Severity,
    /// Tool name to raw constraint, in the order tools were scanned.
    pub tools: OrderedMap<String>,
    pub description: String,
}

impl ConflictRecord {
    pub fn new(package_name: impl Into<String>, severity: Severity, tools: OrderedMap<String>) -> Self {
        let package_name = package_name.into();
        let description = match severity {
            Severity::Critical => format!(
                "Multiple tools require different exact versions of {}",
                package_name
            ),
            Severity::Warning => format!(
                "Multiple tools have different version requirements for {}",
                package_name
            ),
        };

        Self {
            package_name,
            severity,
            tools,
            description,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}
