//! Core domain models for monobump
//!
//! This module contains the fundamental types used throughout the application:
//! - Change severities and version bumping
//! - Dependency specifier classification
//! - Workspace projects
//! - Change declarations and resolved change requests

mod change;
mod change_type;
mod project;
mod version_spec;

pub use change::{ChangeDeclaration, ChangeRequest, ChangeSet};
pub use change_type::ChangeType;
pub use project::{Project, Workspace};
pub use version_spec::{
    is_range_dependency, next_breaking, range_for, VersionSpec, VersionSpecKind,
};
