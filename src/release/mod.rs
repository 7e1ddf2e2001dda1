//! Release planning
//!
//! This module provides:
//! - Aggregation of change declarations into one request per project
//! - Propagation of changes across the dependency graph
//! - Publish ordering of the resulting requests
//! - In-memory manifest updates
//! - The change declaration completeness check

mod aggregate;
mod apply;
mod order;
mod propagate;
mod verify;

pub use aggregate::aggregate_changes;
pub use apply::{apply_changes, ApplyReport, DependencyEdit, ManifestEdit, VersionEdit};
pub use order::sort_change_requests;
pub use propagate::{find_change_requests, propagate_changes};
pub use verify::{find_missing_changed_projects, ChangeRecord, RecordedChange};
