//! Completeness check: every modified project needs a change declaration

use serde::Deserialize;
use std::collections::HashSet;

/// One entry of a persisted change record. Only the project name is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedChange {
    pub package_name: String,
}

/// A persisted record of the changes declared for the current cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChangeRecord {
    #[serde(default)]
    pub changes: Vec<RecordedChange>,
}

impl ChangeRecord {
    /// Parses a record from its JSON text
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Names of the projects in the record
    pub fn project_names(&self) -> HashSet<&str> {
        self.changes
            .iter()
            .map(|change| change.package_name.as_str())
            .collect()
    }
}

/// Returns the modified projects that have no entry in `record`.
///
/// Keeps the order of `modified` and reports each name once.
pub fn find_missing_changed_projects(record: &ChangeRecord, modified: &[String]) -> Vec<String> {
    let declared = record.project_names();
    let mut seen = HashSet::new();
    modified
        .iter()
        .filter(|name| !declared.contains(name.as_str()))
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}
