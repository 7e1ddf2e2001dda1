//! Persists manifest edits to package.json files
//!
//! This module provides:
//! - ManifestWriter for applying an [`ApplyReport`] to project manifests
//! - Dry-run mode support (no actual file modifications)
//! - Format preservation when rewriting versions and specifiers

use crate::domain::Workspace;
use crate::error::ManifestError;
use crate::manifest::package_json::{update_dependency, update_version, MANIFEST_FILENAME};
use crate::release::{ApplyReport, ManifestEdit};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writer for project manifests
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Result of writing one manifest
#[derive(Debug)]
pub struct WriteResult {
    /// Project name
    pub project: String,
    /// Path to the manifest file
    pub path: PathBuf,
    /// Number of fields rewritten
    pub fields_updated: usize,
    /// Whether the file was actually modified
    pub file_modified: bool,
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Rewrites one manifest's text according to `edit`
    pub fn render(content: &str, edit: &ManifestEdit, path: &Path) -> Result<String, ManifestError> {
        let mut current = content.to_string();
        if let Some(version) = &edit.version {
            current = update_version(&current, &version.old, &version.new, path)?;
        }
        for dependency in &edit.dependencies {
            current = update_dependency(
                &current,
                &dependency.name,
                &dependency.old,
                &dependency.new,
                path,
            )?;
        }
        Ok(current)
    }

    /// Applies one project's edit to its manifest file
    pub fn write_edit(&self, edit: &ManifestEdit, folder: &Path) -> Result<WriteResult, ManifestError> {
        let path = folder.join(MANIFEST_FILENAME);
        let content = read_manifest(&path)?;
        let updated = Self::render(&content, edit, &path)?;

        let mut result = WriteResult {
            project: edit.project.clone(),
            path: path.clone(),
            fields_updated: usize::from(edit.version.is_some()) + edit.dependencies.len(),
            file_modified: false,
        };

        if !self.dry_run && updated != content {
            write_manifest(&path, &updated)?;
            result.file_modified = true;
            info!(project = %edit.project, path = %path.display(), "wrote manifest");
        } else {
            debug!(project = %edit.project, dry_run = self.dry_run, "manifest not written");
        }

        Ok(result)
    }

    /// Applies every edit in `report` whose project has a manifest folder.
    ///
    /// Projects without a folder (built in memory) are skipped.
    pub fn write_all(
        &self,
        report: &ApplyReport,
        workspace: &Workspace,
    ) -> Result<Vec<WriteResult>, ManifestError> {
        let mut results = Vec::new();
        for edit in &report.edits {
            let Some(folder) = workspace
                .get(&edit.project)
                .and_then(|project| project.folder.as_deref())
            else {
                continue;
            };
            results.push(self.write_edit(edit, folder)?);
        }
        Ok(results)
    }
}

/// Read a manifest file content safely
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}
