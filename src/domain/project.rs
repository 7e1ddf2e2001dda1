//! Workspace projects
//!
//! The workspace owns every project. Projects refer to each other only by
//! name, so all relationships go through [`Workspace`] lookups.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

/// A workspace member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project name
    pub name: String,
    /// Current version
    pub version: Version,
    /// Dependency name to specifier
    pub dependencies: BTreeMap<String, String>,
    /// Folder holding the project's manifest, when loaded from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,
}

impl Project {
    /// Creates a new project without dependencies
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            dependencies: BTreeMap::new(),
            folder: None,
        }
    }

    /// Adds a dependency (builder pattern)
    pub fn with_dependency(mut self, name: impl Into<String>, spec: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), spec.into());
        self
    }

    /// Sets the manifest folder (builder pattern)
    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Returns the specifier this project declares on `name`, if any
    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).map(String::as_str)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// All projects of a workspace, keyed by name, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    projects: Vec<Project>,
    index: HashMap<String, usize>,
}

impl Workspace {
    /// Creates an empty workspace
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project. Returns the displaced project if the name was taken.
    pub fn insert(&mut self, project: Project) -> Option<Project> {
        match self.index.get(&project.name) {
            Some(&idx) => Some(std::mem::replace(&mut self.projects[idx], project)),
            None => {
                self.index.insert(project.name.clone(), self.projects.len());
                self.projects.push(project);
                None
            }
        }
    }

    /// Looks up a project by name
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.index.get(name).map(|&idx| &self.projects[idx])
    }

    /// Returns true if a project with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates projects in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    /// Iterates projects mutably in registration order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Project> {
        self.projects.iter_mut()
    }

    /// Returns the number of projects
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns true if the workspace has no projects
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl FromIterator<Project> for Workspace {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        let mut workspace = Workspace::new();
        for project in iter {
            workspace.insert(project);
        }
        workspace
    }
}
