//! Text output formatter for human-readable display
//!
//! This module provides:
//! - A per-file table of added, updated and removed dependencies
//! - Emoji and colors when the terminal supports them, ASCII markers otherwise
//! - Summary with a breakdown by change kind

use crate::domain::{DependencyCollectionDiff, LockFileKind, VersionDiffType};
use crate::output::{diff_rows, ChangeKind, DiffRow, OutputFormatter, Verbosity};
use crate::scanner::ScanResult;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Shown when no lock file changed between the revisions
pub const NO_CHANGES_MESSAGE: &str = "No lock file changes found, looks shine!";

/// Shown when a lock file changed without any dependency changes
pub const NO_DEPENDENCY_CHANGES_MESSAGE: &str =
    "The file was updated, but no dependency changes found.";

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors and emoji
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

    fn marker(&self, kind: ChangeKind) -> String {
        if !self.color {
            return kind.marker().to_string();
        }
        match kind {
            ChangeKind::Added => kind.emoji().green().to_string(),
            ChangeKind::Upgraded => kind.emoji().cyan().to_string(),
            ChangeKind::Downgraded => kind.emoji().yellow().to_string(),
            ChangeKind::Unknown => kind.emoji().dimmed().to_string(),
            ChangeKind::Removed => kind.emoji().red().to_string(),
        }
    }

    /// Write the section header for one lock file
    fn format_header(&self, path: &Path, writer: &mut dyn Write) -> std::io::Result<()> {
        let path_display = path.display().to_string();
        let kind = LockFileKind::from_path(path).map(|k| k.display_name());

        match (self.color, kind) {
            (true, Some(kind)) => writeln!(
                writer,
                "{} {}",
                path_display.bold(),
                format!("({})", kind).dimmed()
            ),
            (true, None) => writeln!(writer, "{}", path_display.bold()),
            (false, Some(kind)) => writeln!(writer, "{} ({})", path_display, kind),
            (false, None) => writeln!(writer, "{}", path_display),
        }
    }

    /// Write the dependency table for one lock file
    fn format_table(&self, rows: &[DiffRow], writer: &mut dyn Write) -> std::io::Result<()> {
        let name_width = rows
            .iter()
            .map(|r| r.package.chars().count())
            .max()
            .unwrap_or(0)
            .max("Package".len());
        let before_width = rows
            .iter()
            .map(|r| r.before.chars().count())
            .max()
            .unwrap_or(0)
            .max("Before".len());

        let header = format!(
            "    {:name_width$}  {:before_width$}  After",
            "Package", "Before"
        );
        if self.color {
            writeln!(writer, "{}", header.dimmed())?;
        } else {
            writeln!(writer, "{}", header)?;
        }

        for row in rows {
            let name = format!("{:name_width$}", row.package);
            let before = format!("{:before_width$}", row.before);

            if self.color {
                let after = match row.kind {
                    ChangeKind::Removed => row.after.normal(),
                    _ => row.after.bright_white().bold(),
                };
                writeln!(
                    writer,
                    "  {} {}  {}  {}",
                    self.marker(row.kind),
                    name,
                    before.dimmed(),
                    after
                )?;
            } else {
                writeln!(
                    writer,
                    "  {} {}  {}  {}",
                    row.kind.marker(),
                    name,
                    before,
                    row.after
                )?;
            }
        }

        Ok(())
    }

    /// Write a single file section
    fn format_file(
        &self,
        path: &Path,
        diff: &DependencyCollectionDiff,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if diff.is_empty() {
            if self.verbosity == Verbosity::Quiet {
                return Ok(());
            }
            self.format_header(path, writer)?;
            if self.color {
                writeln!(writer, "  🔄 {}", NO_DEPENDENCY_CHANGES_MESSAGE.dimmed())?;
            } else {
                writeln!(writer, "  {}", NO_DEPENDENCY_CHANGES_MESSAGE)?;
            }
            return writeln!(writer);
        }

        self.format_header(path, writer)?;
        self.format_table(&diff_rows(diff), writer)?;
        writeln!(writer)
    }

    /// Write the summary line
    fn format_summary(&self, result: &ScanResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let diffs = result.diffs.values();
        let added: usize = diffs.clone().map(|d| d.added.len()).sum();
        let removed: usize = diffs.clone().map(|d| d.removed.len()).sum();
        let upgraded: usize = diffs
            .clone()
            .map(|d| d.count_of(VersionDiffType::Upgraded))
            .sum();
        let downgraded: usize = diffs
            .clone()
            .map(|d| d.count_of(VersionDiffType::Downgraded))
            .sum();
        let unknown: usize = diffs.map(|d| d.count_of(VersionDiffType::Unknown)).sum();

        let files = result.diffs.len();
        let files_label = if files == 1 { "lock file" } else { "lock files" };

        if self.color {
            writeln!(
                writer,
                "{} {} changed: {} added, {} upgraded, {} downgraded, {} unknown, {} removed",
                files.to_string().bold(),
                files_label,
                added.to_string().green(),
                upgraded.to_string().cyan(),
                downgraded.to_string().yellow(),
                unknown.to_string().dimmed(),
                removed.to_string().red()
            )
        } else {
            writeln!(
                writer,
                "{} {} changed: {} added, {} upgraded, {} downgraded, {} unknown, {} removed",
                files, files_label, added, upgraded, downgraded, unknown, removed
            )
        }
    }

    /// Write the per-file errors
    fn format_errors(&self, result: &ScanResult, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer)?;
        if self.color {
            writeln!(writer, "{}", "Errors:".red().bold())?;
        } else {
            writeln!(writer, "Errors:")?;
        }
        for error in &result.errors {
            writeln!(writer, "  - {}", error)?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &ScanResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if result.is_empty() {
            if self.verbosity != Verbosity::Quiet {
                if self.color {
                    writeln!(writer, "✨ {}", NO_CHANGES_MESSAGE)?;
                } else {
                    writeln!(writer, "{}", NO_CHANGES_MESSAGE)?;
                }
            }
        } else {
            for (path, diff) in &result.diffs {
                self.format_file(path, diff, writer)?;
            }
            if self.verbosity != Verbosity::Quiet {
                self.format_summary(result, writer)?;
            }
        }

        if self.verbosity == Verbosity::Verbose && !result.errors.is_empty() {
            self.format_errors(result, writer)?;
        }

        Ok(())
    }
}
