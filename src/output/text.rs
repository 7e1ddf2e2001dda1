//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Publish-ordered change listing with colored severities
//! - Manifest edit details in verbose mode
//! - Completeness check report

use crate::domain::{ChangeRequest, ChangeType};
use crate::orchestrator::ReleaseOutcome;
use crate::output::{OutputFormatter, Verbosity};
use crate::release::ManifestEdit;
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn change_label(&self, change_type: ChangeType) -> String {
        if !self.color {
            return change_type.label().to_string();
        }
        match change_type {
            ChangeType::Major => change_type.label().red().bold().to_string(),
            ChangeType::Minor => change_type.label().yellow().to_string(),
            ChangeType::Patch => change_type.label().green().to_string(),
            ChangeType::Dependency => change_type.label().dimmed().to_string(),
        }
    }

    fn dry_run_prefix(&self, dry_run: bool) -> String {
        match (dry_run, self.color) {
            (false, _) => String::new(),
            (true, true) => format!("{} ", "(dry-run)".cyan()),
            (true, false) => "(dry-run) ".to_string(),
        }
    }

    /// Format a single change request line
    fn format_request_line(
        &self,
        position: usize,
        request: &ChangeRequest,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let old_version = request.old_version.to_string();
        let new_version = request.new_version.to_string();
        let label = self.change_label(request.change_type);

        if self.color {
            let name_display = format!("{:width$}", request.package_name, width = max_name_len);
            let derived = if request.is_derived() {
                format!(" {}", "(derived)".dimmed())
            } else {
                String::new()
            };
            writeln!(
                writer,
                "  {:>3}. {} {} {} {} [{}]{}",
                position,
                name_display,
                old_version.dimmed(),
                "→".dimmed(),
                new_version.bright_white().bold(),
                label,
                derived
            )?;
        } else {
            let derived = if request.is_derived() { " (derived)" } else { "" };
            writeln!(
                writer,
                "  {:>3}. {:width$} {} -> {} [{}]{}",
                position,
                request.package_name,
                old_version,
                new_version,
                label,
                derived,
                width = max_name_len
            )?;
        }

        if self.verbosity == Verbosity::Verbose {
            for comment in request.comments() {
                writeln!(writer, "         - {}", comment)?;
            }
        }
        Ok(())
    }

    /// Format one manifest's edits
    fn format_edit(&self, edit: &ManifestEdit, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "  {}", edit.project)?;
        if let Some(version) = &edit.version {
            writeln!(writer, "    version: {} -> {}", version.old, version.new)?;
        }
        for dependency in &edit.dependencies {
            writeln!(
                writer,
                "    {}: \"{}\" -> \"{}\"",
                dependency.name, dependency.old, dependency.new
            )?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format_release(
        &self,
        outcome: &ReleaseOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            for request in &outcome.ordered {
                writeln!(writer, "{} {}", request.package_name, request.new_version)?;
            }
            return Ok(());
        }

        if outcome.ordered.is_empty() {
            writeln!(writer, "No changes to release.")?;
            return Ok(());
        }

        let count = outcome.ordered.len();
        let noun = if count == 1 { "change" } else { "changes" };
        let prefix = self.dry_run_prefix(outcome.dry_run && outcome.report.is_some());
        if self.color {
            writeln!(
                writer,
                "{}{} — {} {}",
                prefix,
                "Publish order".bold(),
                count.to_string().green(),
                noun
            )?;
        } else {
            writeln!(writer, "{}Publish order — {} {}", prefix, count, noun)?;
        }

        let max_name_len = outcome
            .ordered
            .iter()
            .map(|r| r.package_name.len())
            .max()
            .unwrap_or(0)
            .max(12);
        for (idx, request) in outcome.ordered.iter().enumerate() {
            self.format_request_line(idx + 1, request, max_name_len, writer)?;
        }

        if let Some(report) = &outcome.report {
            writeln!(writer)?;
            let action = if outcome.dry_run {
                "Would update"
            } else {
                "Updated"
            };
            writeln!(writer, "{} {} manifest(s)", action, report.manifest_count())?;
            if self.verbosity == Verbosity::Verbose {
                for edit in &report.edits {
                    self.format_edit(edit, writer)?;
                }
            }
            if !outcome.removed_change_files.is_empty() {
                writeln!(
                    writer,
                    "Removed {} change file(s)",
                    outcome.removed_change_files.len()
                )?;
            }
        }

        Ok(())
    }

    fn format_missing(&self, missing: &[String], writer: &mut dyn Write) -> std::io::Result<()> {
        if missing.is_empty() {
            if self.verbosity != Verbosity::Quiet {
                writeln!(writer, "All modified projects have change declarations.")?;
            }
            return Ok(());
        }

        let header = "Missing change declarations for:";
        if self.color {
            writeln!(writer, "{}", header.red().bold())?;
        } else {
            writeln!(writer, "{}", header)?;
        }
        for name in missing {
            writeln!(writer, "  - {}", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChangeDeclaration;
    use crate::release::{ApplyReport, VersionEdit};
    use semver::Version;

    fn request(name: &str, change_type: ChangeType, declared: bool) -> ChangeRequest {
        let mut request = ChangeRequest::new(name, change_type, &Version::new(1, 0, 0)).unwrap();
        if declared {
            request
                .declarations
                .push(ChangeDeclaration::new(name, change_type).with_comment("reworked api"));
        }
        request
    }

    fn render(formatter: &TextFormatter, outcome: &ReleaseOutcome) -> String {
        let mut buf = Vec::new();
        formatter.format_release(outcome, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn outcome() -> ReleaseOutcome {
        ReleaseOutcome {
            ordered: vec![
                request("a", ChangeType::Major, true),
                request("b", ChangeType::Patch, false),
                request("c", ChangeType::Dependency, false),
            ],
            dry_run: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_listing() {
        let output = render(&TextFormatter::with_color(Verbosity::Normal, false), &outcome());
        assert!(output.starts_with("Publish order — 3 changes"));
        assert!(output.contains("1. a            1.0.0 -> 2.0.0 [major]"));
        assert!(output.contains("2. b            1.0.0 -> 1.0.1 [patch] (derived)"));
        assert!(output.contains("3. c            1.0.0 -> 1.0.0 [dependency] (derived)"));
        assert!(!output.contains("reworked api"));
        assert!(!output.contains("dry-run"));
    }

    #[test]
    fn test_verbose_shows_comments() {
        let output = render(&TextFormatter::with_color(Verbosity::Verbose, false), &outcome());
        assert!(output.contains("- reworked api"));
    }

    #[test]
    fn test_quiet_listing() {
        let output = render(&TextFormatter::with_color(Verbosity::Quiet, false), &outcome());
        assert_eq!(output, "a 2.0.0\nb 1.0.1\nc 1.0.0\n");
    }

    #[test]
    fn test_empty_plan() {
        let output = render(
            &TextFormatter::with_color(Verbosity::Normal, false),
            &ReleaseOutcome::default(),
        );
        assert_eq!(output, "No changes to release.\n");
    }

    #[test]
    fn test_applied_release_with_edits() {
        let mut outcome = outcome();
        outcome.report = Some(ApplyReport {
            persist: false,
            edits: vec![ManifestEdit {
                project: "a".to_string(),
                version: Some(VersionEdit {
                    old: Version::new(1, 0, 0),
                    new: Version::new(2, 0, 0),
                }),
                dependencies: Vec::new(),
            }],
        });
        let output = render(&TextFormatter::with_color(Verbosity::Verbose, false), &outcome);
        assert!(output.starts_with("(dry-run) Publish order"));
        assert!(output.contains("Would update 1 manifest(s)"));
        assert!(output.contains("version: 1.0.0 -> 2.0.0"));
    }

    #[test]
    fn test_format_missing() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let mut buf = Vec::new();
        formatter
            .format_missing(&["c".to_string()], &mut buf)
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Missing change declarations for:\n  - c\n"
        );

        let mut buf = Vec::new();
        formatter.format_missing(&[], &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("All modified projects"));
    }

    #[test]
    fn test_new_uses_color() {
        let formatter = TextFormatter::new(Verbosity::Normal);
        assert!(formatter.color);
    }
}
