//! Change declarations and resolved change requests

use super::ChangeType;
use crate::error::ChangeError;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A user-authored change declaration as stored in a change file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDeclaration {
    /// Target project name
    pub package_name: String,
    /// Declared severity
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    /// Optional free-text comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ChangeDeclaration {
    /// Creates a declaration without a comment
    pub fn new(package_name: impl Into<String>, change_type: ChangeType) -> Self {
        Self {
            package_name: package_name.into(),
            change_type,
            comment: None,
        }
    }

    /// Sets the comment (builder pattern)
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// The resolved change for one project in a release cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Project name
    pub package_name: String,
    /// Maximum severity across every declaration and propagated cause
    pub change_type: ChangeType,
    /// Version before this release
    pub old_version: Version,
    /// Version after this release
    pub new_version: Version,
    /// Declarations that contributed; empty for purely derived requests
    pub declarations: Vec<ChangeDeclaration>,
}

impl ChangeRequest {
    /// Creates a request for `package_name` at `change_type`, computing the new version
    pub fn new(
        package_name: impl Into<String>,
        change_type: ChangeType,
        current: &Version,
    ) -> Result<Self, ChangeError> {
        let package_name = package_name.into();
        let new_version = bump_version(&package_name, change_type, current)?;
        Ok(Self {
            package_name,
            change_type,
            old_version: current.clone(),
            new_version,
            declarations: Vec::new(),
        })
    }

    /// Raises the severity to `change_type` if it is higher.
    /// Returns true if the request changed.
    pub fn raise(&mut self, change_type: ChangeType) -> Result<bool, ChangeError> {
        let raised = self.change_type.max(change_type);
        if raised == self.change_type {
            return Ok(false);
        }
        self.new_version = bump_version(&self.package_name, raised, &self.old_version)?;
        self.change_type = raised;
        Ok(true)
    }

    /// Returns true if no declaration targeted this project directly
    pub fn is_derived(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates the comments of contributing declarations
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.declarations
            .iter()
            .filter_map(|d| d.comment.as_deref())
    }
}

fn bump_version(
    name: &str,
    change_type: ChangeType,
    current: &Version,
) -> Result<Version, ChangeError> {
    change_type
        .bump(current)
        .ok_or_else(|| ChangeError::VersionOverflow {
            name: name.to_string(),
            version: current.clone(),
            change_type,
        })
}

impl fmt::Display for ChangeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {} ({})",
            self.package_name, self.old_version, self.new_version, self.change_type
        )
    }
}

/// Resolved change requests keyed by project name, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    requests: Vec<ChangeRequest>,
    index: HashMap<String, usize>,
}

impl ChangeSet {
    /// Creates an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `change_type` into the request for `package_name`, creating it
    /// from `current` if absent. Returns true if the set changed.
    pub fn merge(
        &mut self,
        package_name: &str,
        change_type: ChangeType,
        current: &Version,
    ) -> Result<bool, ChangeError> {
        match self.index.get(package_name) {
            Some(&idx) => self.requests[idx].raise(change_type),
            None => {
                let request = ChangeRequest::new(package_name, change_type, current)?;
                self.index
                    .insert(package_name.to_string(), self.requests.len());
                self.requests.push(request);
                Ok(true)
            }
        }
    }

    /// Looks up the request for a project
    pub fn get(&self, package_name: &str) -> Option<&ChangeRequest> {
        self.index.get(package_name).map(|&idx| &self.requests[idx])
    }

    /// Looks up the request for a project for mutation
    pub fn get_mut(&mut self, package_name: &str) -> Option<&mut ChangeRequest> {
        match self.index.get(package_name) {
            Some(&idx) => Some(&mut self.requests[idx]),
            None => None,
        }
    }

    /// Returns true if the project has a request
    pub fn contains(&self, package_name: &str) -> bool {
        self.index.contains_key(package_name)
    }

    /// Position of the project in discovery order
    pub fn position(&self, package_name: &str) -> Option<usize> {
        self.index.get(package_name).copied()
    }

    /// Iterates requests in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRequest> {
        self.requests.iter()
    }

    /// Returns the number of requests
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if there are no requests
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl IntoIterator for ChangeSet {
    type Item = ChangeRequest;
    type IntoIter = std::vec::IntoIter<ChangeRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_declaration_serde_shape() {
        let json = r#"{"packageName": "a", "type": "minor", "comment": "new api"}"#;
        let parsed: ChangeDeclaration = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            ChangeDeclaration::new("a", ChangeType::Minor).with_comment("new api")
        );

        let without_comment: ChangeDeclaration =
            serde_json::from_str(r#"{"packageName": "b", "type": "patch"}"#).unwrap();
        assert!(without_comment.comment.is_none());
    }

    #[test]
    fn test_request_new_computes_version() {
        let request = ChangeRequest::new("a", ChangeType::Major, &v("1.4.2")).unwrap();
        assert_eq!(request.new_version, v("2.0.0"));
        assert_eq!(request.old_version, v("1.4.2"));
        assert!(request.is_derived());
    }

    #[test]
    fn test_request_raise_only_upwards() {
        let mut request = ChangeRequest::new("a", ChangeType::Minor, &v("1.0.0")).unwrap();
        assert!(!request.raise(ChangeType::Patch).unwrap());
        assert_eq!(request.new_version, v("1.1.0"));
        assert!(request.raise(ChangeType::Major).unwrap());
        assert_eq!(request.change_type, ChangeType::Major);
        assert_eq!(request.new_version, v("2.0.0"));
        assert!(!request.raise(ChangeType::Major).unwrap());
    }

    #[test]
    fn test_request_comments() {
        let mut request = ChangeRequest::new("a", ChangeType::Patch, &v("1.0.0")).unwrap();
        request
            .declarations
            .push(ChangeDeclaration::new("a", ChangeType::Patch).with_comment("fix"));
        request
            .declarations
            .push(ChangeDeclaration::new("a", ChangeType::Patch));
        let comments: Vec<_> = request.comments().collect();
        assert_eq!(comments, vec!["fix"]);
        assert!(!request.is_derived());
    }

    #[test]
    fn test_request_display() {
        let request = ChangeRequest::new("a", ChangeType::Patch, &v("1.0.0")).unwrap();
        assert_eq!(format!("{}", request), "a: 1.0.0 → 1.0.1 (patch)");
    }

    #[test]
    fn test_change_set_merge() {
        let mut set = ChangeSet::new();
        assert!(set.merge("b", ChangeType::Dependency, &v("1.0.0")).unwrap());
        assert!(set.merge("a", ChangeType::Patch, &v("1.0.0")).unwrap());
        assert!(set.merge("b", ChangeType::Patch, &v("1.0.0")).unwrap());
        assert!(!set.merge("b", ChangeType::Dependency, &v("1.0.0")).unwrap());

        assert_eq!(set.len(), 2);
        assert_eq!(set.position("b"), Some(0));
        assert_eq!(set.position("a"), Some(1));
        assert_eq!(set.get("b").unwrap().change_type, ChangeType::Patch);
        assert_eq!(set.get("b").unwrap().new_version, v("1.0.1"));
    }

    #[test]
    fn test_overflowing_bump_is_an_error() {
        let at_max = Version::new(1, 0, u64::MAX);
        let err = ChangeRequest::new("a", ChangeType::Patch, &at_max).unwrap_err();
        assert!(matches!(err, ChangeError::VersionOverflow { ref name, .. } if name == "a"));

        let mut set = ChangeSet::new();
        assert!(set.merge("a", ChangeType::Dependency, &at_max).unwrap());
        assert!(set.merge("a", ChangeType::Patch, &at_max).is_err());
        assert_eq!(set.get("a").unwrap().change_type, ChangeType::Dependency);
        assert!(set.merge("a", ChangeType::Minor, &at_max).unwrap());
        assert_eq!(set.get("a").unwrap().new_version, Version::new(1, 1, 0));
    }
}
