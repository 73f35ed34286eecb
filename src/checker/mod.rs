//! Cross-tool checks over discovered dependencies.

mod conflict;

pub use conflict::{detect_conflicts, ConflictDetector};
