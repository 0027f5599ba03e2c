//! JSON output formatter for machine processing

use crate::domain::{
    Dependency, DependencyCollectionDiff, DependencyDiff, LockFileKind, VersionDiffType,
};
use crate::output::{OutputFormatter, Verbosity};
use crate::scanner::ScanResult;
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

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Summary statistics
    summary: JsonSummary,
    /// Per-file results
    files: Vec<JsonFile<'a>>,
    /// Lock files that could not be scanned
    errors: Vec<JsonError>,
}

/// JSON representation of summary statistics
#[derive(Serialize, Default)]
struct JsonSummary {
    files: usize,
    added: usize,
    upgraded: usize,
    downgraded: usize,
    unknown: usize,
    removed: usize,
}

/// JSON representation of one lock file diff
#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<LockFileKind>,
    added: &'a [Dependency],
    updated: &'a [DependencyDiff],
    removed: &'a [Dependency],
}

/// JSON representation of a per-file error
#[derive(Serialize)]
struct JsonError {
    path: String,
    message: String,
}

impl JsonFormatter {
    fn summarize(result: &ScanResult) -> JsonSummary {
        result
            .diffs
            .values()
            .fold(JsonSummary::default(), |mut summary, diff| {
                summary.files += 1;
                summary.added += diff.added.len();
                summary.upgraded += diff.count_of(VersionDiffType::Upgraded);
                summary.downgraded += diff.count_of(VersionDiffType::Downgraded);
                summary.unknown += diff.count_of(VersionDiffType::Unknown);
                summary.removed += diff.removed.len();
                summary
            })
    }

    fn file_to_json<'a>(
        path: &std::path::Path,
        diff: &'a DependencyCollectionDiff,
    ) -> JsonFile<'a> {
        JsonFile {
            path: path.display().to_string(),
            kind: LockFileKind::from_path(path),
            added: &diff.added,
            updated: &diff.updated,
            removed: &diff.removed,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &ScanResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let files = result
            .diffs
            .iter()
            // Files without dependency changes are noise outside verbose mode
            .filter(|(_, diff)| self.verbosity == Verbosity::Verbose || !diff.is_empty())
            .map(|(path, diff)| Self::file_to_json(path, diff))
            .collect();

        let errors = result
            .errors
            .iter()
            .map(|e| JsonError {
                path: e.path().display().to_string(),
                message: e.to_string(),
            })
            .collect();

        let output = JsonOutput {
            summary: Self::summarize(result),
            files,
            errors,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Package, VersionDiff};
    use crate::scanner::ScanError;
    use crate::versioning::Version;
    use std::path::PathBuf;

    fn dep(name: &str, version: &str) -> Dependency {
        Dependency::new(Package::new(name), Version::parse(version))
    }

    fn render(verbosity: Verbosity, result: &ScanResult) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new(verbosity)
            .format(result, &mut output)
            .unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    fn sample_result() -> ScanResult {
        let mut result = ScanResult::default();
        result.diffs.insert(
            PathBuf::from("app/package-lock.json"),
            DependencyCollectionDiff {
                added: vec![dep("left-pad", "1.3.0")],
                removed: vec![],
                updated: vec![DependencyDiff::new(
                    Package::new("lodash"),
                    VersionDiff::new(
                        Version::parse("4.17.21"),
                        Version::parse("4.17.20"),
                        VersionDiffType::Downgraded,
                    ),
                )],
            },
        );
        result
            .diffs
            .insert(PathBuf::from("Cargo.lock"), DependencyCollectionDiff::default());
        result
    }

    #[test]
    fn test_json_output_shape() {
        let json = render(Verbosity::Normal, &sample_result());

        let files = json["files"].as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["path"], "app/package-lock.json");
        assert_eq!(files[0]["kind"], "npm");
        assert_eq!(files[0]["added"][0]["package"], "left-pad");
        assert_eq!(files[0]["added"][0]["version"], "1.3.0");
        assert_eq!(files[0]["updated"][0]["package"], "lodash");
        assert_eq!(files[0]["updated"][0]["before"], "4.17.21");
        assert_eq!(files[0]["updated"][0]["after"], "4.17.20");
        assert_eq!(files[0]["updated"][0]["type"], "downgraded");
        assert!(files[0]["removed"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_summary() {
        let json = render(Verbosity::Normal, &sample_result());
        assert_eq!(json["summary"]["files"], 2);
        assert_eq!(json["summary"]["added"], 1);
        assert_eq!(json["summary"]["downgraded"], 1);
        assert_eq!(json["summary"]["upgraded"], 0);
    }

    #[test]
    fn test_json_verbose_includes_unchanged_files() {
        let json = render(Verbosity::Verbose, &sample_result());
        assert_eq!(json["files"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_errors() {
        let mut result = ScanResult::default();
        result.errors.push(ScanError::ReadError {
            path: PathBuf::from("uv.lock"),
            message: "bad object".to_string(),
        });

        let json = render(Verbosity::Normal, &result);
        assert_eq!(json["errors"][0]["path"], "uv.lock");
        assert!(json["errors"][0]["message"]
            .as_str()
            .unwrap()
            .contains("bad object"));
    }

    #[test]
    fn test_json_empty_result() {
        let json = render(Verbosity::Normal, &ScanResult::default());
        assert!(json["files"].as_array().unwrap().is_empty());
        assert!(json["errors"].as_array().unwrap().is_empty());
    }
}
