//! Dependency statistics over a set of tools.
//!
//! Everything is recomputed from the tool list on each call. VCS references
//! are left out of every counter.

use crate::model::{FragmentedPackage, OrderedMap, PackageUsage, ScanStatistics, ToolRecord};
use std::collections::HashSet;

/// Number of entries in the popularity ranking.
pub const MOST_POPULAR_LIMIT: usize = 10;

/// Tools with at most this many dependencies (and at least one) are "light".
pub const LIGHT_TOOL_MAX: usize = 3;

/// Tools with at least this many dependencies are "heavy".
pub const HEAVY_TOOL_MIN: usize = 10;

/// Packages with at least this many distinct constraints are "fragmented".
pub const FRAGMENTED_MIN_CONSTRAINTS: usize = 3;

/// Computes [`ScanStatistics`] for `tools`.
///
/// # Example
///
/// ```
/// use depscan::model::{DependencyRecord, ToolBuilder};
/// use depscan::stats::analyze;
///
/// let empty = ToolBuilder::new("scripts", "/tools/scripts").build();
/// let stats = analyze(&[empty]);
///
/// assert_eq!(stats.zero_dependency_tools, vec!["scripts"]);
/// assert_eq!(stats.stdlib_only_tools, vec!["scripts"]);
/// ```
pub fn analyze(tools: &[ToolRecord]) -> ScanStatistics {
    let mut stats = ScanStatistics::default();
    let mut unique: HashSet<&str> = HashSet::new();

    for tool in tools {
        let count = tool.registry_dependency_count();
        stats.total_dependencies += count;

        match count {
            0 => {
                stats.zero_dependency_tools.push(tool.name.clone());
                stats.stdlib_only_tools.push(tool.name.clone());
            }
            n if n <= LIGHT_TOOL_MAX => stats.light_tools.push(tool.name.clone()),
            n if n >= HEAVY_TOOL_MIN => stats.heavy_tools.push(tool.name.clone()),
            _ => {}
        }

        let mut seen_in_tool: HashSet<&str> = HashSet::new();
        for dep in tool.registry_dependencies() {
            let name = dep.package_name.as_str();
            unique.insert(name);

            if seen_in_tool.insert(name) {
                *stats.package_usage.entry_or_default(name) += 1;
            }
            *stats
                .version_distribution
                .entry_or_default(name)
                .entry_or_default(&dep.version_constraint) += 1;
        }
    }

    stats.unique_packages = unique.len();
    stats.most_popular_packages = most_popular(&stats.package_usage, MOST_POPULAR_LIMIT);
    stats.fragmented_packages = fragmented(&stats.version_distribution);

    stats
}

/// Top `limit` packages by tool count. The sort is stable, so ties keep
/// first-encountered order.
fn most_popular(usage: &OrderedMap<usize>, limit: usize) -> Vec<PackageUsage> {
    let mut ranked: Vec<PackageUsage> = usage
        .iter()
        .map(|(name, count)| PackageUsage {
            package_name: name.to_string(),
            tool_count: *count,
        })
        .collect();

    ranked.sort_by(|a, b| b.tool_count.cmp(&a.tool_count));
    ranked.truncate(limit);
    ranked
}

fn fragmented(distribution: &OrderedMap<OrderedMap<usize>>) -> Vec<FragmentedPackage> {
    distribution
        .iter()
        .filter(|(_, constraints)| constraints.len() >= FRAGMENTED_MIN_CONSTRAINTS)
        .map(|(name, constraints)| FragmentedPackage {
            package_name: name.to_string(),
            constraints: constraints.clone(),
        })
        .collect()
}
