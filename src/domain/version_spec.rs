//! Dependency specifier classification
//!
//! Handles the specifier shapes found in workspace manifests:
//! - Exact: `1.2.3`
//! - Floating range: `>=1.2.3 <2.0.0`
//! - Caret: `^1.2.3`
//! - Tilde: `~1.2.3`
//!
//! Anything else is kept as [`VersionSpecKind::Other`] and never rewritten.

use regex::Regex;
use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

const SEMVER: &str = r"\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?";

static EXACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^({})$", SEMVER)).unwrap());
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^>=({})\s+<({})$", SEMVER, SEMVER)).unwrap());
static CARET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\^({})$", SEMVER)).unwrap());
static TILDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^~({})$", SEMVER)).unwrap());

/// The shape of a dependency specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSpecKind {
    /// Exact pin (e.g., `1.2.3`)
    Exact,
    /// Floating range with inclusive lower and exclusive upper bound (e.g., `>=1.0.0 <2.0.0`)
    Range,
    /// Caret range (e.g., `^1.2.3`)
    Caret,
    /// Tilde range (e.g., `~1.2.3`)
    Tilde,
    /// Unrecognized shape (tags, wildcards, protocols)
    Other,
}

impl VersionSpecKind {
    /// Returns true if specifiers of this kind are rewritten when the target is bumped
    pub fn is_rewritable(&self) -> bool {
        matches!(self, VersionSpecKind::Exact | VersionSpecKind::Range)
    }
}

/// A classified dependency specifier with its original string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    /// The kind of specifier
    pub kind: VersionSpecKind,
    /// The raw specifier as written in the manifest
    pub raw: String,
    lower: Option<Version>,
    upper: Option<Version>,
}

impl VersionSpec {
    /// Classifies a specifier string. Never fails; unknown shapes become `Other`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let mut spec = VersionSpec {
            kind: VersionSpecKind::Other,
            raw: raw.to_string(),
            lower: None,
            upper: None,
        };

        if let Some(caps) = EXACT_RE.captures(trimmed) {
            if let Ok(version) = Version::parse(&caps[1]) {
                spec.kind = VersionSpecKind::Exact;
                spec.lower = Some(version);
            }
        } else if let Some(caps) = RANGE_RE.captures(trimmed) {
            if let (Ok(lower), Ok(upper)) = (Version::parse(&caps[1]), Version::parse(&caps[2])) {
                spec.kind = VersionSpecKind::Range;
                spec.lower = Some(lower);
                spec.upper = Some(upper);
            }
        } else if let Some(caps) = CARET_RE.captures(trimmed) {
            if let Ok(version) = Version::parse(&caps[1]) {
                spec.kind = VersionSpecKind::Caret;
                spec.lower = Some(version);
            }
        } else if let Some(caps) = TILDE_RE.captures(trimmed) {
            if let Ok(version) = Version::parse(&caps[1]) {
                spec.kind = VersionSpecKind::Tilde;
                spec.lower = Some(version);
            }
        }

        spec
    }

    /// Returns true if `version` is accepted by this specifier.
    ///
    /// Caret, tilde and other shapes are read as npm ranges (`>=1.0.0`, `*`,
    /// `1.x`, `^1.0.0 || ^2.0.0`). Strings that are not ranges at all, such as
    /// dist-tags or `workspace:` protocols, accept nothing.
    pub fn satisfies(&self, version: &Version) -> bool {
        match self.kind {
            VersionSpecKind::Exact => self.lower.as_ref() == Some(version),
            VersionSpecKind::Range => match (&self.lower, &self.upper) {
                (Some(lower), Some(upper)) => lower <= version && version < upper,
                _ => false,
            },
            VersionSpecKind::Caret | VersionSpecKind::Tilde | VersionSpecKind::Other => {
                parse_requirements(&self.raw)
                    .is_some_and(|reqs| reqs.iter().any(|req| req.matches(version)))
            }
        }
    }

    /// Produces the specifier that pins this dependency to `version`,
    /// keeping the current shape. Returns `None` for shapes that are not rewritten.
    pub fn rewrite_for(&self, version: &Version) -> Option<String> {
        if !self.kind.is_rewritable() {
            return None;
        }
        match self.kind {
            VersionSpecKind::Range => Some(range_for(version)),
            _ => Some(version.to_string()),
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Parses an npm range into `semver` requirements, one per `||` alternative.
///
/// npm separates comparators with spaces where `semver` expects commas, and a
/// bare full version is an exact match rather than a caret requirement.
fn parse_requirements(raw: &str) -> Option<Vec<VersionReq>> {
    raw.split("||")
        .map(|alternative| {
            let comparators = npm_comparators(alternative);
            if comparators.is_empty() {
                // npm reads an empty range as `*`
                return Some(VersionReq::STAR);
            }
            VersionReq::parse(&comparators.join(", ")).ok()
        })
        .collect()
}

fn npm_comparators(range: &str) -> Vec<String> {
    let mut comparators = Vec::new();
    let mut operator = String::new();
    for token in range.split_whitespace() {
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '^' | '~')) {
            operator.push_str(token);
            continue;
        }
        let op = std::mem::take(&mut operator);
        if op.is_empty() && Version::parse(token).is_ok() {
            comparators.push(format!("={}", token));
        } else {
            comparators.push(format!("{}{}", op, token));
        }
    }
    if !operator.is_empty() {
        // a dangling operator keeps the range unparseable
        comparators.push(operator);
    }
    comparators
}

/// Returns true if the specifier is a normalized floating range like `>=1.0.0 <2.0.0`
pub fn is_range_dependency(spec: &str) -> bool {
    VersionSpec::parse(spec).kind == VersionSpecKind::Range
}

/// Returns the next breaking boundary above `version`
pub fn next_breaking(version: &Version) -> Version {
    Version::new(version.major + 1, 0, 0)
}

/// Builds the normalized floating range starting at `version`
pub fn range_for(version: &Version) -> String {
    format!(">={} <{}", version, next_breaking(version))
}
