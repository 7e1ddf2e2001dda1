//! Applies resolved change requests to the in-memory workspace

use crate::domain::{ChangeSet, VersionSpec, Workspace};
use semver::Version;
use serde::Serialize;
use tracing::debug;

/// A project's version change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEdit {
    pub old: Version,
    pub new: Version,
}

/// A rewritten dependency specifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdit {
    /// Dependency name
    pub name: String,
    /// Specifier before the rewrite
    pub old: String,
    /// Specifier after the rewrite
    pub new: String,
}

/// Everything that changed in one project's manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEdit {
    /// Project name
    pub project: String,
    /// Version change, if the project was bumped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionEdit>,
    /// Rewritten dependency specifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyEdit>,
}

impl ManifestEdit {
    fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            version: None,
            dependencies: Vec::new(),
        }
    }

    /// Returns true if nothing changed
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.dependencies.is_empty()
    }
}

/// Result of applying a change set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Whether the caller asked for the edits to be persisted
    pub persist: bool,
    /// Per-project edits in workspace order
    pub edits: Vec<ManifestEdit>,
}

impl ApplyReport {
    /// Number of edited manifests
    pub fn manifest_count(&self) -> usize {
        self.edits.len()
    }
}

/// Rewrites project versions and dependency specifiers in `workspace`.
///
/// Every bumped project gets its new version. Every exact or floating-range
/// specifier on a changed project is rewritten to match the new version,
/// including in projects that are not changing themselves. Other specifier
/// shapes are left alone. The workspace is mutated whether or not `persist`
/// is set; the flag is only carried into the report.
pub fn apply_changes(changes: &ChangeSet, workspace: &mut Workspace, persist: bool) -> ApplyReport {
    let mut edits = Vec::new();

    for project in workspace.iter_mut() {
        let mut edit = ManifestEdit::new(&project.name);

        if let Some(request) = changes.get(&project.name) {
            if request.change_type.bumps_version() && project.version != request.new_version {
                edit.version = Some(VersionEdit {
                    old: project.version.clone(),
                    new: request.new_version.clone(),
                });
                debug!(project = %project.name, version = %request.new_version, "set version");
                project.version = request.new_version.clone();
            }
        }

        for (dep_name, spec) in project.dependencies.iter_mut() {
            if dep_name == &project.name {
                continue;
            }
            let Some(request) = changes.get(dep_name) else {
                continue;
            };
            let Some(rewritten) = VersionSpec::parse(spec).rewrite_for(&request.new_version)
            else {
                continue;
            };
            if rewritten == *spec {
                continue;
            }

            debug!(
                project = %project.name,
                dependency = %dep_name,
                from = %spec,
                to = %rewritten,
                "rewrote dependency specifier"
            );
            edit.dependencies.push(DependencyEdit {
                name: dep_name.clone(),
                old: std::mem::replace(spec, rewritten.clone()),
                new: rewritten,
            });
        }

        if !edit.is_empty() {
            edits.push(edit);
        }
    }

    ApplyReport { persist, edits }
}
