//! Release orchestrator for coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: load → aggregate → propagate → order → apply → write
//! - Dry-run mode support
//! - The change declaration completeness check

use crate::config::WorkspaceConfig;
use crate::domain::{ChangeDeclaration, ChangeRequest, Workspace};
use crate::error::AppError;
use crate::graph::DependencyGraph;
use crate::manifest::{
    load_workspace, read_change_files, read_change_record, remove_change_files, ManifestWriter,
    WriteResult,
};
use crate::release::{
    apply_changes, find_change_requests, find_missing_changed_projects, sort_change_requests,
    ApplyReport,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Computes the change requests for `declarations` in publish order
pub fn plan_release(
    declarations: &[ChangeDeclaration],
    workspace: &Workspace,
) -> Result<Vec<ChangeRequest>, AppError> {
    let changes = find_change_requests(declarations, workspace)?;
    let graph = DependencyGraph::from_workspace(workspace);
    Ok(sort_change_requests(&changes, &graph)?)
}

/// Computes the change requests and applies them to `workspace` in memory
pub fn prepare_release(
    declarations: &[ChangeDeclaration],
    workspace: &mut Workspace,
    persist: bool,
) -> Result<(Vec<ChangeRequest>, ApplyReport), AppError> {
    let changes = find_change_requests(declarations, workspace)?;
    let graph = DependencyGraph::from_workspace(workspace);
    let ordered = sort_change_requests(&changes, &graph)?;
    let report = apply_changes(&changes, workspace, persist);
    Ok((ordered, report))
}

/// Result of running the orchestrator
#[derive(Debug, Default)]
pub struct ReleaseOutcome {
    /// Change requests in publish order
    pub ordered: Vec<ChangeRequest>,
    /// Manifest edits, when changes were applied
    pub report: Option<ApplyReport>,
    /// Write results for each manifest
    pub write_results: Vec<WriteResult>,
    /// Change files deleted after applying
    pub removed_change_files: Vec<PathBuf>,
    /// Whether this was a dry-run
    pub dry_run: bool,
}

/// Orchestrator for coordinating the release workflow
pub struct Orchestrator {
    config: WorkspaceConfig,
}

impl Orchestrator {
    /// Loads the workspace configuration
    pub fn new(config_path: &Path) -> Result<Self, AppError> {
        Ok(Self {
            config: WorkspaceConfig::load(config_path)?,
        })
    }

    /// Creates an orchestrator from an already parsed configuration
    pub fn with_config(config: WorkspaceConfig) -> Self {
        Self { config }
    }

    /// Computes the publish plan without modifying anything
    pub fn plan(&self) -> Result<ReleaseOutcome, AppError> {
        let workspace = load_workspace(&self.config)?;
        let change_files = read_change_files(&self.config.change_folder_path())?;
        let ordered = plan_release(&change_files.declarations, &workspace)?;
        info!(requests = ordered.len(), "computed release plan");

        Ok(ReleaseOutcome {
            ordered,
            dry_run: true,
            ..Default::default()
        })
    }

    /// Applies the release: updates manifests and consumes change files.
    ///
    /// In dry-run mode the edits are computed and reported but nothing is written.
    pub fn apply(&self, dry_run: bool, keep_changes: bool) -> Result<ReleaseOutcome, AppError> {
        let mut workspace = load_workspace(&self.config)?;
        let change_files = read_change_files(&self.config.change_folder_path())?;
        let (ordered, report) =
            prepare_release(&change_files.declarations, &mut workspace, !dry_run)?;

        let writer = ManifestWriter::new(!report.persist);
        let write_results = writer.write_all(&report, &workspace)?;

        let mut removed_change_files = Vec::new();
        if report.persist && !keep_changes {
            remove_change_files(&change_files.files)?;
            removed_change_files = change_files.files;
        }

        info!(
            requests = ordered.len(),
            manifests = report.manifest_count(),
            dry_run,
            "applied release"
        );

        Ok(ReleaseOutcome {
            ordered,
            report: Some(report),
            write_results,
            removed_change_files,
            dry_run,
        })
    }
}

/// Returns the modified projects missing from the change record at `record_path`
pub fn verify_changes(record_path: &Path, changed: &[String]) -> Result<Vec<String>, AppError> {
    let record = read_change_record(record_path)?;
    Ok(find_missing_changed_projects(&record, changed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChangeType, Project};
    use semver::Version;

    fn chain() -> Workspace {
        let v = Version::new(1, 0, 0);
        vec![
            Project::new("a", v.clone()),
            Project::new("b", v.clone()).with_dependency("a", ">=1.0.0 <2.0.0"),
            Project::new("c", v.clone()).with_dependency("b", ">=1.0.0 <2.0.0"),
            Project::new("d", v).with_dependency("c", "1.0.0"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_plan_release_order() {
        let declarations = vec![
            ChangeDeclaration::new("a", ChangeType::Patch),
            ChangeDeclaration::new("a", ChangeType::Major),
        ];
        let ordered = plan_release(&declarations, &chain()).unwrap();
        let names: Vec<_> = ordered.iter().map(|r| r.package_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_prepare_release_mutates_without_persist() {
        let mut workspace = chain();
        let declarations = vec![ChangeDeclaration::new("a", ChangeType::Major)];
        let (ordered, report) = prepare_release(&declarations, &mut workspace, false).unwrap();

        assert_eq!(ordered.len(), 3);
        assert!(!report.persist);
        assert_eq!(workspace.get("a").unwrap().version, Version::new(2, 0, 0));
    }

    #[test]
    fn test_plan_release_unknown_project() {
        let declarations = vec![ChangeDeclaration::new("ghost", ChangeType::Patch)];
        let err = plan_release(&declarations, &chain()).unwrap_err();
        assert!(matches!(err, AppError::Change(_)));
    }

    #[test]
    fn test_plan_release_cycle() {
        let v = Version::new(1, 0, 0);
        let workspace: Workspace = vec![
            Project::new("a", v.clone()).with_dependency("b", "1.0.0"),
            Project::new("b", v).with_dependency("a", "1.0.0"),
        ]
        .into_iter()
        .collect();
        let declarations = vec![ChangeDeclaration::new("a", ChangeType::Patch)];
        let err = plan_release(&declarations, &workspace).unwrap_err();
        assert!(matches!(err, AppError::Graph(_)));
    }
}
