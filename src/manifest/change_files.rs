//! Change files: reading declarations, reading records, removing consumed files
//!
//! A change file is JSON of the shape
//! `{ "changes": [ { "packageName": "a", "type": "patch", "comment": "..." } ] }`.

use crate::domain::ChangeDeclaration;
use crate::error::{ChangeError, IoError};
use crate::release::ChangeRecord;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ChangeFile {
    #[serde(default)]
    changes: Vec<ChangeDeclaration>,
}

/// Declarations read from a change folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeFiles {
    /// All declarations, in file-name order then in-file order
    pub declarations: Vec<ChangeDeclaration>,
    /// Files the declarations came from
    pub files: Vec<PathBuf>,
}

fn read_change_file(path: &Path) -> Result<String, ChangeError> {
    fs::read_to_string(path).map_err(|e| ChangeError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads every `*.json` change file in `folder`.
///
/// A missing folder means no changes were declared.
pub fn read_change_files(folder: &Path) -> Result<ChangeFiles, ChangeError> {
    let mut result = ChangeFiles::default();
    if !folder.is_dir() {
        debug!(folder = %folder.display(), "change folder does not exist");
        return Ok(result);
    }

    let entries = fs::read_dir(folder).map_err(|e| ChangeError::ReadError {
        path: folder.to_path_buf(),
        source: e,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        let content = read_change_file(&path)?;
        let file: ChangeFile = serde_json::from_str(&content)
            .map_err(|e| ChangeError::parse_error(&path, e.to_string()))?;
        debug!(file = %path.display(), count = file.changes.len(), "read change file");
        result.declarations.extend(file.changes);
        result.files.push(path);
    }

    Ok(result)
}

/// Reads a persisted change record
pub fn read_change_record(path: &Path) -> Result<ChangeRecord, ChangeError> {
    let content = read_change_file(path)?;
    ChangeRecord::from_json(&content).map_err(|e| ChangeError::parse_error(path, e.to_string()))
}

/// Deletes change files that have been applied
pub fn remove_change_files(files: &[PathBuf]) -> Result<(), IoError> {
    for path in files {
        match fs::remove_file(path) {
            Ok(()) => debug!(file = %path.display(), "removed change file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(file = %path.display(), "change file already removed")
            }
            Err(e) => return Err(IoError::generic(path, e)),
        }
    }
    Ok(())
}
