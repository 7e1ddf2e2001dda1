//! Publish ordering of resolved change requests

use crate::domain::{ChangeRequest, ChangeSet};
use crate::error::GraphError;
use crate::graph::DependencyGraph;
use std::collections::BTreeSet;
use tracing::debug;

/// Orders change requests so every project follows the changed projects it depends on.
///
/// Only edges between changed projects are considered. Projects that are
/// ready at the same time keep their discovery order. A cycle among changed
/// projects is an error naming every project that could not be ordered.
pub fn sort_change_requests(
    changes: &ChangeSet,
    graph: &DependencyGraph,
) -> Result<Vec<ChangeRequest>, GraphError> {
    let requests: Vec<&ChangeRequest> = changes.iter().collect();

    // Number of unpublished changed dependencies per request.
    let mut pending: Vec<usize> = requests
        .iter()
        .map(|request| {
            graph
                .dependencies_of(&request.package_name)
                .iter()
                .filter(|dep| changes.contains(dep))
                .count()
        })
        .collect();

    let mut ready: BTreeSet<usize> = pending
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(idx, _)| idx)
        .collect();

    let mut ordered = Vec::with_capacity(requests.len());
    while let Some(idx) = ready.pop_first() {
        let request = requests[idx];
        ordered.push(request.clone());

        for dependent in graph.dependents_of(&request.package_name) {
            if let Some(pos) = changes.position(dependent) {
                pending[pos] -= 1;
                if pending[pos] == 0 {
                    ready.insert(pos);
                }
            }
        }
    }

    if ordered.len() < requests.len() {
        let projects: Vec<String> = pending
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(idx, _)| requests[idx].package_name.clone())
            .collect();
        return Err(GraphError::Cycle { projects });
    }

    debug!(
        order = ?ordered.iter().map(|r| r.package_name.as_str()).collect::<Vec<_>>(),
        "resolved publish order"
    );
    Ok(ordered)
}
