//! Workspace configuration (`monobump.toml`)

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILENAME: &str = "monobump.toml";

/// Default folder holding change files, relative to the configuration file
pub const DEFAULT_CHANGE_FOLDER: &str = "common/changes";

/// A configured workspace project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    /// Project name; must match the manifest's `name`
    pub name: String,
    /// Folder holding `package.json`, relative to the configuration file
    pub folder: PathBuf,
}

/// Parsed `monobump.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkspaceConfig {
    /// Folder holding change files
    #[serde(default = "default_change_folder")]
    pub change_folder: PathBuf,
    /// Projects in publish-tie-break order
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    /// Directory of the configuration file; project folders resolve against it
    #[serde(skip)]
    pub root: PathBuf,
}

fn default_change_folder() -> PathBuf {
    PathBuf::from(DEFAULT_CHANGE_FOLDER)
}

impl WorkspaceConfig {
    /// Parses configuration text. `path` is used for error messages and to
    /// resolve relative folders.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: WorkspaceConfig =
            toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if config.projects.is_empty() {
            return Err(ConfigError::EmptyWorkspace {
                path: path.to_path_buf(),
            });
        }

        let mut seen = HashSet::new();
        for project in &config.projects {
            if !seen.insert(project.name.as_str()) {
                return Err(ConfigError::DuplicateProject {
                    name: project.name.clone(),
                });
            }
        }

        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Reads and parses a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::parse(&content, path)
    }

    /// Absolute location of the change folder
    pub fn change_folder_path(&self) -> PathBuf {
        self.root.join(&self.change_folder)
    }

    /// Absolute location of a project's folder
    pub fn project_path(&self, project: &ProjectConfig) -> PathBuf {
        self.root.join(&project.folder)
    }
}
