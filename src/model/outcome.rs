use super::{ConflictRecord, OrderedMap, ToolRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A package and the number of tools that declare it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageUsage {
    pub package_name: String,
    pub tool_count: usize,
}

/// A package declared with three or more distinct constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentedPackage {
    pub package_name: String,
    /// Constraint string to number of declarations using it.
    pub constraints: OrderedMap<usize>,
}

/// Aggregate counters and rankings over one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStatistics {
    pub total_dependencies: usize,
    pub unique_packages: usize,
    pub package_usage: OrderedMap<usize>,
    pub version_distribution: OrderedMap<OrderedMap<usize>>,
    pub zero_dependency_tools: Vec<String>,
    pub stdlib_only_tools: Vec<String>,
    pub light_tools: Vec<String>,
    pub heavy_tools: Vec<String>,
    pub most_popular_packages: Vec<PackageUsage>,
    pub fragmented_packages: Vec<FragmentedPackage>,
}

/// Everything produced by one scan, handed to the report layer.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub timestamp: DateTime<Utc>,
    pub tool_count: usize,
    pub total_dependency_count: usize,
    pub unique_package_count: usize,
    pub conflicts: Vec<ConflictRecord>,
    pub tools: Vec<ToolRecord>,
    pub statistics: ScanStatistics,
}

impl ScanOutcome {
    /// Runs conflict detection and statistics over `tools` and bundles the results.
    pub fn from_tools(tools: Vec<ToolRecord>) -> Self {
        let conflicts = crate::checker::detect_conflicts(&tools);
        let statistics = crate::stats::analyze(&tools);
        Self::new(tools, conflicts, statistics)
    }

    pub fn new(
        tools: Vec<ToolRecord>,
        conflicts: Vec<ConflictRecord>,
        statistics: ScanStatistics,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            tool_count: tools.len(),
            total_dependency_count: statistics.total_dependencies,
            unique_package_count: statistics.unique_packages,
            conflicts,
            tools,
            statistics,
        }
    }

    pub fn critical_conflicts(&self) -> impl Iterator<Item = &ConflictRecord> {
        self.conflicts
            .iter()
            .filter(|c| c.is_critical())
    }

    pub fn has_critical(&self) -> bool {
        self.critical_conflicts().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencyRecord, ToolBuilder};

    fn tool(name: &str, deps: &[(&str, &str)]) -> ToolRecord {
        let mut builder = ToolBuilder::new(name, format!("/tools/{}", name));
        for (pkg, spec) in deps {
            builder.push(DependencyRecord::new(pkg, *spec, "requirements.txt"));
        }
        builder.build()
    }

    #[test]
    fn test_from_tools_empty() {
        let outcome = ScanOutcome::from_tools(Vec::new());
        assert_eq!(outcome.tool_count, 0);
        assert_eq!(outcome.total_dependency_count, 0);
        assert_eq!(outcome.unique_package_count, 0);
        assert!(outcome.conflicts.is_empty());
        assert!(!outcome.has_critical());
    }

    #[test]
    fn test_from_tools_counts_and_conflicts() {
        let outcome = ScanOutcome::from_tools(vec![
            tool("a", &[("requests", "==2.28.0"), ("click", "")]),
            tool("b", &[("requests", "==2.31.0")]),
        ]);

        assert_eq!(outcome.tool_count, 2);
        assert_eq!(outcome.total_dependency_count, 3);
        assert_eq!(outcome.unique_package_count, 2);
        assert_eq!(outcome.conflicts.len(), 1);
        assert!(outcome.has_critical());
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = ScanOutcome::from_tools(vec![
            tool("a", &[("requests", ">=2.0")]),
            tool("b", &[("requests", ">=2.5")]),
        ]);

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["tool_count"], 2);
        assert_eq!(value["conflicts"][0]["severity"], "WARNING");
        assert_eq!(value["conflicts"][0]["tools"]["a"], ">=2.0");
        assert_eq!(value["tools"][1]["name"], "b");
    }
}
