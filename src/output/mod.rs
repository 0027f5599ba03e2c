//! Output formatting for scan results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - Markdown output for pull request comments

mod json;
mod markdown;
mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

use crate::domain::{DependencyCollectionDiff, VersionDiffType};
use crate::scanner::ScanResult;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
    /// Markdown tables
    Markdown,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json, markdown)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors and emoji (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, markdown: bool, verbose: bool, quiet: bool, color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else if markdown {
            OutputFormat::Markdown
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the scan result
    fn format(&self, result: &ScanResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
    }
}

/// Kind of a table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Upgraded,
    Downgraded,
    Unknown,
    Removed,
}

impl ChangeKind {
    /// Plain ASCII marker
    pub fn marker(&self) -> &'static str {
        match self {
            ChangeKind::Added => "+",
            ChangeKind::Upgraded => "^",
            ChangeKind::Downgraded => "v",
            ChangeKind::Unknown => "~",
            ChangeKind::Removed => "-",
        }
    }

    /// Emoji marker
    pub fn emoji(&self) -> &'static str {
        match self {
            ChangeKind::Added => "➕",
            ChangeKind::Upgraded => "⬆️",
            ChangeKind::Downgraded => "⬇️",
            ChangeKind::Unknown => "🔄",
            ChangeKind::Removed => "➖",
        }
    }
}

impl From<VersionDiffType> for ChangeKind {
    fn from(kind: VersionDiffType) -> Self {
        match kind {
            VersionDiffType::Upgraded => ChangeKind::Upgraded,
            VersionDiffType::Downgraded => ChangeKind::Downgraded,
            VersionDiffType::Unknown => ChangeKind::Unknown,
        }
    }
}

/// One row of a diff table; an empty version means "not present"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub kind: ChangeKind,
    pub package: String,
    pub before: String,
    pub after: String,
}

/// Flattens a diff into table rows: added, then updated, then removed
pub fn diff_rows(diff: &DependencyCollectionDiff) -> Vec<DiffRow> {
    let added = diff.added.iter().map(|dep| DiffRow {
        kind: ChangeKind::Added,
        package: dep.name().to_string(),
        before: String::new(),
        after: dep.version.to_string(),
    });
    let updated = diff.updated.iter().map(|d| DiffRow {
        kind: d.version_diff.kind.into(),
        package: d.package.name().to_string(),
        before: d.version_diff.before.to_string(),
        after: d.version_diff.after.to_string(),
    });
    let removed = diff.removed.iter().map(|dep| DiffRow {
        kind: ChangeKind::Removed,
        package: dep.name().to_string(),
        before: dep.version.to_string(),
        after: String::new(),
    });

    added.chain(updated).chain(removed).collect()
}
