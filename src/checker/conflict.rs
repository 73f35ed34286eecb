use crate::model::{ConflictRecord, OrderedMap, Severity, ToolRecord};
use pep440_rs::VersionSpecifiers;
use std::collections::HashSet;

/// Flags packages whose declared constraints differ between tools.
///
/// This is a textual heuristic, not a resolver: two ranges that do overlap
/// are still reported as a [`Severity::Warning`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConflictDetector;

impl ConflictDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detects conflicts across all tools, in first-seen package order.
    pub fn detect(&self, tools: &[ToolRecord]) -> Vec<ConflictRecord> {
        group_by_package(tools)
            .iter()
            .filter(|(_, tool_constraints)| tool_constraints.len() >= 2)
            .filter_map(|(package, tool_constraints)| {
                self.check_compatibility(package, tool_constraints)
            })
            .collect()
    }

    /// Classifies the constraints several tools place on one package.
    ///
    /// Returns `None` when at most one distinct non-empty constraint exists.
    pub fn check_compatibility(
        &self,
        package_name: &str,
        tool_constraints: &OrderedMap<String>,
    ) -> Option<ConflictRecord> {
        let specs: Vec<&str> = tool_constraints
            .values()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();

        // Parsed only for diagnostics; an unparseable spec is classified like any other.
        for spec in &specs {
            if let Err(e) = spec.parse::<VersionSpecifiers>() {
                tracing::debug!("Unparseable constraint {:?} for {}: {}", spec, package_name, e);
            }
        }

        let unique: HashSet<&str> = specs.iter().copied().collect();
        if unique.len() <= 1 {
            return None;
        }

        let exact_pins: HashSet<&str> = unique
            .iter()
            .copied()
            .filter(|s| s.starts_with("=="))
            .collect();

        let severity = if exact_pins.len() > 1 {
            Severity::Critical
        } else {
            Severity::Warning
        };

        Some(ConflictRecord::new(
            package_name,
            severity,
            tool_constraints.clone(),
        ))
    }
}

/// Detects conflicts with the default detector.
///
/// # Example
///
/// ```
/// use depscan::checker::detect_conflicts;
/// use depscan::model::{DependencyRecord, Severity, ToolBuilder};
///
/// let mut a = ToolBuilder::new("a", "/tools/a");
/// a.push(DependencyRecord::new("requests", "==2.28.0", "requirements.txt"));
/// let mut b = ToolBuilder::new("b", "/tools/b");
/// b.push(DependencyRecord::new("requests", "==2.31.0", "requirements.txt"));
///
/// let conflicts = detect_conflicts(&[a.build(), b.build()]);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].severity, Severity::Critical);
/// ```
pub fn detect_conflicts(tools: &[ToolRecord]) -> Vec<ConflictRecord> {
    ConflictDetector::new().detect(tools)
}

/// Package name to (tool name to constraint). VCS and editable records are
/// skipped; a tool declaring a package twice keeps its last constraint.
fn group_by_package(tools: &[ToolRecord]) -> OrderedMap<OrderedMap<String>> {
    let mut packages: OrderedMap<OrderedMap<String>> = OrderedMap::new();

    for tool in tools {
        for dep in tool.dependencies.iter().filter(|d| d.is_comparable()) {
            packages
                .entry_or_default(&dep.package_name)
                .insert(tool.name.as_str(), dep.version_constraint.clone());
        }
    }

    packages
}
