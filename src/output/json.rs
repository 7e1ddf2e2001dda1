//! JSON output formatter for machine processing

use crate::domain::ChangeRequest;
use crate::orchestrator::ReleaseOutcome;
use crate::output::{OutputFormatter, Verbosity};
use crate::release::ManifestEdit;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of a release
#[derive(Serialize)]
struct JsonRelease<'a> {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Change requests in publish order
    changes: Vec<JsonChange<'a>>,
    /// Manifest edits (only when changes were applied)
    #[serde(skip_serializing_if = "Option::is_none")]
    edits: Option<&'a [ManifestEdit]>,
    /// Removed change files
    #[serde(skip_serializing_if = "Vec::is_empty")]
    removed_change_files: Vec<String>,
}

/// JSON representation of a change request
#[derive(Serialize)]
struct JsonChange<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    change_type: &'static str,
    from: String,
    to: String,
    derived: bool,
    /// Contributing comments (only in verbose mode)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    comments: Vec<&'a str>,
}

/// JSON representation of a completeness check
#[derive(Serialize)]
struct JsonVerify<'a> {
    complete: bool,
    missing: &'a [String],
}

impl JsonFormatter {
    fn change_to_json<'a>(&self, request: &'a ChangeRequest) -> JsonChange<'a> {
        let comments = if self.verbosity == Verbosity::Verbose {
            request.comments().collect()
        } else {
            Vec::new()
        };
        JsonChange {
            name: &request.package_name,
            change_type: request.change_type.label(),
            from: request.old_version.to_string(),
            to: request.new_version.to_string(),
            derived: request.is_derived(),
            comments,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_release(
        &self,
        outcome: &ReleaseOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonRelease {
            dry_run: outcome.dry_run,
            changes: outcome
                .ordered
                .iter()
                .map(|request| self.change_to_json(request))
                .collect(),
            edits: outcome.report.as_ref().map(|report| report.edits.as_slice()),
            removed_change_files: outcome
                .removed_change_files
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }

    fn format_missing(&self, missing: &[String], writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonVerify {
            complete: missing.is_empty(),
            missing,
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChangeDeclaration, ChangeType};
    use crate::release::ApplyReport;
    use semver::Version;
    use serde_json::Value;

    fn outcome() -> ReleaseOutcome {
        let mut a = ChangeRequest::new("a", ChangeType::Major, &Version::new(1, 0, 0)).unwrap();
        a.declarations
            .push(ChangeDeclaration::new("a", ChangeType::Major).with_comment("breaking"));
        let b = ChangeRequest::new("b", ChangeType::Patch, &Version::new(1, 0, 0)).unwrap();
        ReleaseOutcome {
            ordered: vec![a, b],
            dry_run: true,
            ..Default::default()
        }
    }

    fn render(formatter: &JsonFormatter, outcome: &ReleaseOutcome) -> Value {
        let mut buf = Vec::new();
        formatter.format_release(outcome, &mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_release_json() {
        let json = render(&JsonFormatter::new(Verbosity::Normal), &outcome());
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["changes"][0]["name"], "a");
        assert_eq!(json["changes"][0]["type"], "major");
        assert_eq!(json["changes"][0]["to"], "2.0.0");
        assert_eq!(json["changes"][0]["derived"], false);
        assert_eq!(json["changes"][1]["derived"], true);
        assert!(json["changes"][0].get("comments").is_none());
        assert!(json.get("edits").is_none());
    }

    #[test]
    fn test_release_json_verbose_comments() {
        let json = render(&JsonFormatter::new(Verbosity::Verbose), &outcome());
        assert_eq!(json["changes"][0]["comments"][0], "breaking");
    }

    #[test]
    fn test_release_json_with_edits() {
        let mut outcome = outcome();
        outcome.report = Some(ApplyReport {
            persist: true,
            edits: Vec::new(),
        });
        let json = render(&JsonFormatter::new(Verbosity::Normal), &outcome);
        assert_eq!(json["edits"], serde_json::json!([]));
    }

    #[test]
    fn test_missing_json() {
        let mut buf = Vec::new();
        JsonFormatter::new(Verbosity::Normal)
            .format_missing(&["c".to_string()], &mut buf)
            .unwrap();
        let json: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["complete"], false);
        assert_eq!(json["missing"][0], "c");
    }
}
