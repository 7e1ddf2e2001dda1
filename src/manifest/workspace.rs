//! Loads the workspace project map from disk

use crate::config::WorkspaceConfig;
use crate::domain::Workspace;
use crate::error::{AppError, ManifestError};
use crate::manifest::package_json::{parse_package_json, MANIFEST_FILENAME};
use crate::manifest::read_manifest;
use tracing::debug;

/// Reads every configured project's package.json, in configuration order
pub fn load_workspace(config: &WorkspaceConfig) -> Result<Workspace, AppError> {
    let mut workspace = Workspace::new();

    for project_config in &config.projects {
        let folder = config.project_path(project_config);
        let path = folder.join(MANIFEST_FILENAME);
        if !path.is_file() {
            return Err(ManifestError::not_found(&path).into());
        }

        let content = read_manifest(&path)?;
        let project = parse_package_json(&content, &path)?;
        if project.name != project_config.name {
            return Err(ManifestError::NameMismatch {
                path,
                expected: project_config.name.clone(),
                found: project.name,
            }
            .into());
        }

        debug!(project = %project.name, version = %project.version, "loaded project");
        workspace.insert(project.with_folder(folder));
    }

    Ok(workspace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_project(root: &Path, folder: &str, json: &str) {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), json).unwrap();
    }

    fn config(root: &Path, toml: &str) -> WorkspaceConfig {
        WorkspaceConfig::parse(toml, &root.join("monobump.toml")).unwrap()
    }

    #[test]
    fn test_load_workspace() {
        let temp_dir = TempDir::new().unwrap();
        write_project(
            temp_dir.path(),
            "packages/a",
            r#"{"name": "a", "version": "1.0.0"}"#,
        );
        write_project(
            temp_dir.path(),
            "packages/b",
            r#"{"name": "b", "version": "1.2.0", "dependencies": {"a": "1.0.0"}}"#,
        );
        let config = config(
            temp_dir.path(),
            r#"
[[projects]]
name = "b"
folder = "packages/b"

[[projects]]
name = "a"
folder = "packages/a"
"#,
        );

        let workspace = load_workspace(&config).unwrap();
        let names: Vec<_> = workspace.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(workspace.get("b").unwrap().dependency("a"), Some("1.0.0"));
        assert_eq!(
            workspace.get("a").unwrap().folder.as_deref(),
            Some(temp_dir.path().join("packages/a").as_path())
        );
    }

    #[test]
    fn test_missing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(
            temp_dir.path(),
            "[[projects]]\nname = \"a\"\nfolder = \"a\"\n",
        );
        let err = load_workspace(&config).unwrap_err();
        assert!(matches!(err, AppError::Manifest(ManifestError::NotFound { .. })));
    }

    #[test]
    fn test_name_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path(), "a", r#"{"name": "other", "version": "1.0.0"}"#);
        let config = config(
            temp_dir.path(),
            "[[projects]]\nname = \"a\"\nfolder = \"a\"\n",
        );
        let err = load_workspace(&config).unwrap_err();
        assert!(format!("{}", err).contains("expected 'a'"));
    }
}
