//! Markdown output formatter
//!
//! Renders one table per lock file. The same rendering is used as the body
//! of pull request comments.

use crate::domain::DependencyCollectionDiff;
use crate::output::text::{NO_CHANGES_MESSAGE, NO_DEPENDENCY_CHANGES_MESSAGE};
use crate::output::{diff_rows, OutputFormatter};
use crate::scanner::ScanResult;
use indexmap::IndexMap;
use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

/// Markdown formatter
#[derive(Debug, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new Markdown formatter
    pub fn new() -> Self {
        Self
    }

    /// Render diffs as Markdown
    pub fn render(&self, diffs: &IndexMap<PathBuf, DependencyCollectionDiff>) -> String {
        if diffs.is_empty() {
            return format!("✨ {}\n", NO_CHANGES_MESSAGE);
        }

        let mut out = String::new();
        for (path, diff) in diffs {
            // Writing into a String cannot fail
            let _ = writeln!(out, "#### {}", escape(&path.display().to_string()));
            out.push('\n');

            if diff.is_empty() {
                let _ = writeln!(out, "🔄 {}", NO_DEPENDENCY_CHANGES_MESSAGE);
                out.push('\n');
                continue;
            }

            out.push_str("|  | Package | Before | After |\n");
            out.push_str("|---|---|---|---|\n");
            for row in diff_rows(diff) {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    row.kind.emoji(),
                    escape(&row.package),
                    escape(&row.before),
                    escape(&row.after)
                );
            }
            out.push('\n');
        }

        out
    }
}

/// Escapes characters that would break a table cell
fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, result: &ScanResult, writer: &mut dyn Write) -> std::io::Result<()> {
        write!(writer, "{}", self.render(&result.diffs))
    }
}
