//! Core data types for dependencies, tools, conflicts and scan outcomes.
//!
//! - [`DependencyRecord`] - A single declared dependency
//! - [`ToolRecord`] - A discovered tool and everything parsed from it
//! - [`ConflictRecord`] - A version disagreement between tools
//! - [`ScanStatistics`] - Aggregate counters and rankings
//! - [`ScanOutcome`] - Everything a report needs, bundled
//!
//! # Example
//!
//! ```
//! use depscan::model::{DependencyRecord, ScanOutcome, ToolBuilder};
//!
//! let mut builder = ToolBuilder::new("fetcher", "/tools/fetcher");
//! builder.push(DependencyRecord::new("Requests", "==2.31.0", "requirements.txt"));
//! let outcome = ScanOutcome::from_tools(vec![builder.build()]);
//!
//! assert_eq!(outcome.tool_count, 1);
//! assert_eq!(outcome.total_dependency_count, 1);
//! ```

mod conflict;
mod dependency;
mod ordered;
mod outcome;

pub use conflict::*;
pub use dependency::*;
pub use ordered::OrderedMap;
pub use outcome::*;
