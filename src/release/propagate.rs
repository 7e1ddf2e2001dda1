//! Propagates explicit changes to every transitively affected project
//!
//! Traversal is breadth-first over an explicit worklist. Each project is
//! expanded once per severity it reaches, so a later path that raises a
//! project's severity re-expands it and cycles still terminate.
//!
//! For every dependent `Q` of a project `P` whose version changes:
//! - `Q`'s specifier still accepts `P`'s new version: `Q` gets a `dependency`
//!   request (its specifier is rewritten, its version is not).
//! - otherwise `Q` must be republished and gets at least a `patch` request.
//!
//! A `dependency` request leaves its project's version unchanged, so it never
//! invalidates a specifier further downstream and is not expanded.

use crate::domain::{ChangeDeclaration, ChangeSet, ChangeType, VersionSpec, Workspace};
use crate::error::ChangeError;
use crate::graph::DependencyGraph;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

use super::aggregate_changes;

/// Expands `changes` with every derived request implied by the dependency graph
pub fn propagate_changes(
    mut changes: ChangeSet,
    workspace: &Workspace,
    graph: &DependencyGraph,
) -> Result<ChangeSet, ChangeError> {
    let mut queue: VecDeque<String> = changes
        .iter()
        .filter(|request| request.change_type.bumps_version())
        .map(|request| request.package_name.clone())
        .collect();
    let mut expanded: HashMap<String, ChangeType> = HashMap::new();

    while let Some(name) = queue.pop_front() {
        let Some(request) = changes.get(&name) else {
            continue;
        };
        let change_type = request.change_type;
        if expanded.get(&name).is_some_and(|seen| *seen >= change_type) {
            continue;
        }
        expanded.insert(name.clone(), change_type);
        let new_version = request.new_version.clone();

        for dependent in graph.dependents_of(&name) {
            let Some(project) = workspace.get(dependent) else {
                continue;
            };
            let Some(raw_spec) = project.dependency(&name) else {
                continue;
            };

            let required = if VersionSpec::parse(raw_spec).satisfies(&new_version) {
                ChangeType::Dependency
            } else {
                ChangeType::Patch
            };

            let changed = changes.merge(dependent, required, &project.version)?;
            debug!(
                from = %name,
                to = %dependent,
                spec = raw_spec,
                version = %new_version,
                required = %required,
                changed,
                "propagated change"
            );

            let bumps = changes
                .get(dependent)
                .is_some_and(|r| r.change_type.bumps_version());
            if changed && bumps {
                queue.push_back(dependent.clone());
            }
        }
    }

    Ok(changes)
}

/// Aggregates declarations and propagates them across the workspace
pub fn find_change_requests(
    declarations: &[ChangeDeclaration],
    workspace: &Workspace,
) -> Result<ChangeSet, ChangeError> {
    let explicit = aggregate_changes(declarations, workspace)?;
    let graph = DependencyGraph::from_workspace(workspace);
    propagate_changes(explicit, workspace, &graph)
}
