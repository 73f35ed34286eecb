use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Package name used for `-e .` self-references.
pub const LOCAL_EDITABLE: &str = "local-editable";

/// Constraint recorded for dependencies pulled straight from a VCS URL.
pub const VCS_CONSTRAINT: &str = "git";

/// Normalizes a package name for comparison: lowercase, `_` becomes `-`.
///
/// ```
/// use depscan::model::normalize_package_name;
///
/// assert_eq!(normalize_package_name("Requests_Lib"), "requests-lib");
/// assert_eq!(normalize_package_name("requests-lib"), "requests-lib");
/// ```
pub fn normalize_package_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

/// A single dependency declared in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub package_name: String,
    /// Raw constraint text, empty when the manifest gives none.
    pub version_constraint: String,
    #[serde(default)]
    pub extras: Vec<String>,
    pub source_path: PathBuf,
    #[serde(default)]
    pub is_vcs_reference: bool,
    #[serde(default)]
    pub is_editable: bool,
}

impl DependencyRecord {
    /// Creates a plain registry dependency. The name is normalized.
    pub fn new(
        name: &str,
        version_constraint: impl Into<String>,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package_name: normalize_package_name(name),
            version_constraint: version_constraint.into(),
            extras: Vec::new(),
            source_path: source_path.into(),
            is_vcs_reference: false,
            is_editable: false,
        }
    }

    /// Creates a dependency sourced from a VCS URL.
    pub fn vcs(name: &str, source_path: impl Into<PathBuf>) -> Self {
        Self {
            is_vcs_reference: true,
            ..Self::new(name, VCS_CONSTRAINT, source_path)
        }
    }

    /// Creates the sentinel emitted for an editable install of the tool itself.
    pub fn local_editable(source_path: impl Into<PathBuf>) -> Self {
        Self {
            is_editable: true,
            ..Self::new(LOCAL_EDITABLE, "", source_path)
        }
    }

    pub fn with_extras(mut self, extras: Vec<String>) -> Self {
        self.extras = extras;
        self
    }

    pub fn editable(mut self, is_editable: bool) -> Self {
        self.is_editable = is_editable;
        self
    }

    pub fn is_local_editable(&self) -> bool {
        self.is_editable && self.package_name == LOCAL_EDITABLE
    }

    /// Whether this record takes part in cross-tool conflict detection.
    pub fn is_comparable(&self) -> bool {
        !self.is_vcs_reference && !self.is_editable
    }
}

/// A sub-directory identified as a tool by the presence of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub name: String,
    pub path: PathBuf,
    pub dependencies: Vec<DependencyRecord>,
    pub has_requirements_txt: bool,
    pub has_setup_py: bool,
    #[serde(default)]
    pub parse_errors: Vec<String>,
}

impl ToolRecord {
    /// Dependencies that count towards statistics (VCS references excluded).
    pub fn registry_dependencies(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.dependencies.iter().filter(|d| !d.is_vcs_reference)
    }

    pub fn registry_dependency_count(&self) -> usize {
        self.registry_dependencies().count()
    }
}

/// Accumulates a tool's dependencies and errors during a scan.
///
/// The finished [`ToolRecord`] is only produced by [`ToolBuilder::build`], so a
/// record is never observed half-populated.
#[derive(Debug)]
pub struct ToolBuilder {
    name: String,
    path: PathBuf,
    dependencies: Vec<DependencyRecord>,
    has_requirements_txt: bool,
    has_setup_py: bool,
    parse_errors: Vec<String>,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
            dependencies: Vec::new(),
            has_requirements_txt: false,
            has_setup_py: false,
            parse_errors: Vec::new(),
        }
    }

    pub fn has_requirements_txt(mut self, present: bool) -> Self {
        self.has_requirements_txt = present;
        self
    }

    pub fn has_setup_py(mut self, present: bool) -> Self {
        self.has_setup_py = present;
        self
    }

    pub fn push(&mut self, dependency: DependencyRecord) {
        self.dependencies.push(dependency);
    }

    pub fn extend(&mut self, dependencies: impl IntoIterator<Item = DependencyRecord>) {
        self.dependencies.extend(dependencies);
    }

    /// Records a failure for one manifest as `"<manifest>: <message>"`.
    pub fn record_error(&mut self, manifest: &str, error: impl std::fmt::Display) {
        self.parse_errors.push(format!("{}: {}", manifest, error));
    }

    pub fn build(self) -> ToolRecord {
        ToolRecord {
            name: self.name,
            path: self.path,
            dependencies: self.dependencies,
            has_requirements_txt: self.has_requirements_txt,
            has_setup_py: self.has_setup_py,
            parse_errors: self.parse_errors,
        }
    }
}
