//! Workspace manifests on disk
//!
//! This module provides functionality to:
//! - Load the workspace project map from `monobump.toml` and package.json files
//! - Read change files and persisted change records
//! - Write manifest edits back with format preservation

mod change_files;
mod package_json;
mod workspace;
mod writer;

pub use change_files::{read_change_files, read_change_record, remove_change_files, ChangeFiles};
pub use package_json::{parse_package_json, update_dependency, update_version, MANIFEST_FILENAME};
pub use workspace::load_workspace;
pub use writer::{read_manifest, write_manifest, ManifestWriter, WriteResult};
