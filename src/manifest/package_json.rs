//! package.json reading and in-place rewriting
//!
//! Reading goes through `serde_json`. Rewriting splices the new value into
//! the original text so formatting and key order are preserved, and only
//! touches the top-level `version` and members of `dependencies`.

use crate::domain::Project;
use crate::error::ManifestError;
use semver::Version;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;

/// Manifest file name inside each project folder
pub const MANIFEST_FILENAME: &str = "package.json";

/// Parses package.json text into a [`Project`].
///
/// Only `dependencies` take part in propagation; non-string specifiers are skipped.
pub fn parse_package_json(content: &str, path: &Path) -> Result<Project, ManifestError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

    let name = json
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ManifestError::json_parse_error(path, "missing string field `name`"))?;

    let raw_version = json
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| ManifestError::json_parse_error(path, "missing string field `version`"))?;
    let version = Version::parse(raw_version).map_err(|e| ManifestError::InvalidVersion {
        path: path.to_path_buf(),
        version: raw_version.to_string(),
        message: e.to_string(),
    })?;

    let mut dependencies = BTreeMap::new();
    if let Some(deps) = json.get("dependencies").and_then(Value::as_object) {
        for (dep_name, spec) in deps {
            if let Some(spec) = spec.as_str() {
                dependencies.insert(dep_name.clone(), spec.to_string());
            }
        }
    }

    Ok(Project {
        name: name.to_string(),
        version,
        dependencies,
        folder: None,
    })
}

/// Byte index just past the string literal opening at `start`
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Byte index just past the object or array opening at `start`
fn container_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = string_end(bytes, i)?;
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Span of the top-level object
fn root_object(content: &str) -> Option<Range<usize>> {
    let bytes = content.as_bytes();
    let start = skip_whitespace(bytes, 0);
    if bytes.get(start) != Some(&b'{') {
        return None;
    }
    Some(start..container_end(bytes, start)?)
}

/// Span of the value of member `key` directly inside `object`.
/// Members of nested objects are not considered.
fn member_value(content: &str, object: Range<usize>, key: &str) -> Option<Range<usize>> {
    let bytes = content.as_bytes();
    let mut i = object.start + 1;
    while i < object.end {
        match bytes[i] {
            b'"' => {
                let key_end = string_end(bytes, i)?;
                let colon = skip_whitespace(bytes, key_end);
                if bytes.get(colon) != Some(&b':') {
                    i = key_end;
                    continue;
                }
                let value_start = skip_whitespace(bytes, colon + 1);
                let value_end = match bytes.get(value_start).copied()? {
                    b'"' => string_end(bytes, value_start)?,
                    b'{' | b'[' => container_end(bytes, value_start)?,
                    _ => value_start,
                };
                if &content[i + 1..key_end - 1] == key {
                    return Some(value_start..value_end);
                }
                i = value_end;
            }
            b'{' | b'[' => i = container_end(bytes, i)?,
            _ => i += 1,
        }
    }
    None
}

/// Replaces the string value at `span` with `new` if it currently reads `old`
fn replace_string_value(
    content: &str,
    span: Option<Range<usize>>,
    field: &str,
    old: &str,
    new: &str,
    path: &Path,
) -> Result<String, ManifestError> {
    let expected = format!("\"{}\"", old);
    match span {
        Some(span) if content[span.clone()] == expected => Ok(format!(
            "{}\"{}\"{}",
            &content[..span.start],
            new,
            &content[span.end..]
        )),
        _ => Err(ManifestError::field_not_found(path, field, old)),
    }
}

/// Rewrites the project's top-level `version` field
pub fn update_version(
    content: &str,
    old: &Version,
    new: &Version,
    path: &Path,
) -> Result<String, ManifestError> {
    let span = root_object(content).and_then(|root| member_value(content, root, "version"));
    replace_string_value(content, span, "version", &old.to_string(), &new.to_string(), path)
}

/// Rewrites the specifier recorded for `name` in the `dependencies` object.
///
/// Other dependency sections are left untouched.
pub fn update_dependency(
    content: &str,
    name: &str,
    old: &str,
    new: &str,
    path: &Path,
) -> Result<String, ManifestError> {
    let span = root_object(content)
        .and_then(|root| member_value(content, root, "dependencies"))
        .filter(|deps| content.as_bytes().get(deps.start) == Some(&b'{'))
        .and_then(|deps| member_value(content, deps, name));
    replace_string_value(content, span, name, old, new, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "name": "b",
  "version": "1.0.0",
  "description": "depends on a",
  "dependencies": {
    "a": ">=1.0.0 <2.0.0",
    "lodash": "^4.17.21",
    "local": { "path": "../local" }
  },
  "devDependencies": {
    "typescript": "~5.0.0"
  }
}"#;

    fn path() -> &'static Path {
        Path::new("packages/b/package.json")
    }

    #[test]
    fn test_parse_package_json() {
        let project = parse_package_json(SAMPLE, path()).unwrap();
        assert_eq!(project.name, "b");
        assert_eq!(project.version, Version::new(1, 0, 0));
        assert_eq!(project.dependency("a"), Some(">=1.0.0 <2.0.0"));
        assert_eq!(project.dependency("lodash"), Some("^4.17.21"));
        assert_eq!(project.dependency("local"), None);
        assert_eq!(project.dependency("typescript"), None);
    }

    #[test]
    fn test_parse_missing_version() {
        let err = parse_package_json(r#"{"name": "x"}"#, path()).unwrap_err();
        assert!(format!("{}", err).contains("version"));
    }

    #[test]
    fn test_parse_invalid_version() {
        let err = parse_package_json(r#"{"name": "x", "version": "one"}"#, path()).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidVersion { .. }));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_package_json("{ not json", path()).unwrap_err();
        assert!(matches!(err, ManifestError::JsonParseError { .. }));
    }

    #[test]
    fn test_update_version_preserves_formatting() {
        let updated = update_version(
            SAMPLE,
            &Version::new(1, 0, 0),
            &Version::new(1, 0, 1),
            path(),
        )
        .unwrap();
        assert!(updated.contains(r#""version": "1.0.1","#));
        assert!(updated.contains(r#""description": "depends on a","#));
        assert_eq!(updated.lines().count(), SAMPLE.lines().count());
    }

    #[test]
    fn test_update_dependency() {
        let updated =
            update_dependency(SAMPLE, "a", ">=1.0.0 <2.0.0", ">=2.0.0 <3.0.0", path()).unwrap();
        assert!(updated.contains(r#""a": ">=2.0.0 <3.0.0","#));
        assert!(updated.contains(r#""lodash": "^4.17.21""#));
        assert!(updated.contains(r#""version": "1.0.0""#));
    }

    #[test]
    fn test_update_scoped_dependency() {
        let content = r#"{"dependencies": {"@scope/pkg": "1.0.0"}}"#;
        let updated = update_dependency(content, "@scope/pkg", "1.0.0", "1.0.1", path()).unwrap();
        assert_eq!(updated, r#"{"dependencies": {"@scope/pkg": "1.0.1"}}"#);
    }

    #[test]
    fn test_update_dependency_leaves_other_sections() {
        let content = r#"{
  "name": "b",
  "version": "1.0.0",
  "dependencies": {
    "a": "1.0.0"
  },
  "devDependencies": {
    "a": "1.0.0"
  },
  "peerDependencies": {
    "a": "1.0.0"
  }
}"#;
        let updated = update_dependency(content, "a", "1.0.0", "1.0.1", path()).unwrap();
        assert_eq!(updated.matches(r#""a": "1.0.1""#).count(), 1);
        assert_eq!(updated.matches(r#""a": "1.0.0""#).count(), 2);
        assert!(updated.contains(r#""version": "1.0.0""#));
        let deps_at = updated.find("\"dependencies\"").unwrap();
        let dev_at = updated.find("\"devDependencies\"").unwrap();
        let bumped_at = updated.find(r#""a": "1.0.1""#).unwrap();
        assert!(deps_at < bumped_at && bumped_at < dev_at);
    }

    #[test]
    fn test_update_version_ignores_nested_keys() {
        let content = r#"{
  "name": "b",
  "engines": { "version": "1.0.0" },
  "version": "1.0.0"
}"#;
        let updated = update_version(
            content,
            &Version::new(1, 0, 0),
            &Version::new(2, 0, 0),
            path(),
        )
        .unwrap();
        assert_eq!(
            updated,
            r#"{
  "name": "b",
  "engines": { "version": "1.0.0" },
  "version": "2.0.0"
}"#
        );
    }

    #[test]
    fn test_update_dependency_only_in_dev_section() {
        let content = r#"{"dependencies": {}, "devDependencies": {"a": "1.0.0"}}"#;
        let err = update_dependency(content, "a", "1.0.0", "1.0.1", path()).unwrap_err();
        assert!(matches!(err, ManifestError::FieldNotFound { .. }));
    }

    #[test]
    fn test_update_with_braces_inside_strings() {
        let content = r#"{"description": "uses { and \" quotes", "dependencies": {"a": "1.0.0"}}"#;
        let updated = update_dependency(content, "a", "1.0.0", "1.0.1", path()).unwrap();
        assert_eq!(
            updated,
            r#"{"description": "uses { and \" quotes", "dependencies": {"a": "1.0.1"}}"#
        );
    }

    #[test]
    fn test_update_missing_field() {
        let err = update_dependency(SAMPLE, "a", "9.9.9", "1.0.0", path()).unwrap_err();
        assert!(matches!(err, ManifestError::FieldNotFound { .. }));
    }
}
