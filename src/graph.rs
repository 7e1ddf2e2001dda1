//! Workspace dependency graph
//!
//! Edges run from a project to each workspace project it depends on.
//! Specifiers naming packages outside the workspace are ignored.

use crate::domain::Workspace;
use std::collections::HashMap;

/// Name-keyed dependency graph derived from a [`Workspace`]
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    dependencies: HashMap<String, Vec<String>>,
    dependents: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Builds the graph. Adjacency lists follow workspace registration order.
    pub fn from_workspace(workspace: &Workspace) -> Self {
        let mut graph = DependencyGraph::default();

        for project in workspace.iter() {
            graph.dependencies.entry(project.name.clone()).or_default();
            graph.dependents.entry(project.name.clone()).or_default();
        }

        for project in workspace.iter() {
            for dep_name in project.dependencies.keys() {
                if dep_name == &project.name || !workspace.contains(dep_name) {
                    continue;
                }
                if let Some(deps) = graph.dependencies.get_mut(&project.name) {
                    deps.push(dep_name.clone());
                }
                if let Some(users) = graph.dependents.get_mut(dep_name) {
                    users.push(project.name.clone());
                }
            }
        }

        graph
    }

    /// Workspace projects that `name` depends on
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.dependencies.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Workspace projects that depend on `name`
    pub fn dependents_of(&self, name: &str) -> &[String] {
        self.dependents.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
