//! Change severity definitions
//!
//! Severities are totally ordered: `dependency` < `patch` < `minor` < `major`.

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a change to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// No version bump; only a recorded dependency specifier changes
    Dependency,
    /// Bug fix release
    Patch,
    /// Backwards compatible feature release
    Minor,
    /// Breaking release
    Major,
}

impl ChangeType {
    /// Returns the higher of two severities
    pub fn max(self, other: ChangeType) -> ChangeType {
        if other > self {
            other
        } else {
            self
        }
    }

    /// Returns true if this severity changes the owning project's version
    pub fn bumps_version(&self) -> bool {
        !matches!(self, ChangeType::Dependency)
    }

    /// Applies this severity to a version.
    ///
    /// Pre-release and build metadata are cleared by every real bump.
    /// Returns `None` if the incremented component would overflow.
    pub fn bump(&self, version: &Version) -> Option<Version> {
        let (major, minor, patch) = match self {
            ChangeType::Dependency => return Some(version.clone()),
            ChangeType::Patch => (version.major, version.minor, version.patch.checked_add(1)?),
            ChangeType::Minor => (version.major, version.minor.checked_add(1)?, 0),
            ChangeType::Major => (version.major.checked_add(1)?, 0, 0),
        };
        Some(Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        })
    }

    /// Returns the lowercase label used in change files
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Dependency => "dependency",
            ChangeType::Patch => "patch",
            ChangeType::Minor => "minor",
            ChangeType::Major => "major",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
