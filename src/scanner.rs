//! Scan orchestration between two revisions
//!
//! This module provides:
//! - Workflow coordination: list changed files → read both sides → parse → diff
//! - Per-file error isolation: a malformed lock file is recorded and skipped
//! - Progress display while reading revisions

use crate::diff::DependencyCollectionDiffer;
use crate::domain::{DependencyCollectionDiff, LockFileKind, PackagePool};
use crate::error::{AppError, LockFileError};
use crate::lockfile::get_parser;
use crate::progress::ScanProgress;
use crate::vcs::RevisionContentProvider;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Scanner for lock file changes between two revisions
pub struct Scanner<P> {
    /// Source of file contents
    provider: P,
    /// Diff engine
    differ: DependencyCollectionDiffer,
    /// Whether to show a progress bar
    show_progress: bool,
}

/// Result of a scan
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Diff per changed lock file, in the order git reported the files
    pub diffs: IndexMap<PathBuf, DependencyCollectionDiff>,
    /// Lock files that could not be read or parsed
    pub errors: Vec<ScanError>,
}

impl ScanResult {
    /// Total number of dependency changes across all files
    pub fn total_changes(&self) -> usize {
        self.diffs.values().map(|d| d.count()).sum()
    }

    /// Returns true if no lock file changed
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }
}

/// Errors that can occur for a single lock file during a scan
#[derive(Debug)]
pub enum ScanError {
    /// Failed to read the file at a revision
    ReadError { path: PathBuf, message: String },
    /// Failed to parse the file at a revision
    ParseError {
        path: PathBuf,
        revision: String,
        message: String,
    },
}

impl ScanError {
    /// Path of the lock file the error belongs to
    pub fn path(&self) -> &Path {
        match self {
            ScanError::ReadError { path, .. } | ScanError::ParseError { path, .. } => path,
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::ReadError { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
            ScanError::ParseError {
                path,
                revision,
                message,
            } => write!(
                f,
                "Failed to parse {} at {}: {}",
                path.display(),
                revision,
                message
            ),
        }
    }
}

impl std::error::Error for ScanError {}

impl<P: RevisionContentProvider> Scanner<P> {
    /// Create a scanner over the given content provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            differ: DependencyCollectionDiffer::default(),
            show_progress: false,
        }
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Scan lock file changes between `base` and `head`
    ///
    /// Fails only on setup problems (unknown revision, git failure while
    /// listing files); per-file problems end up in [`ScanResult::errors`].
    pub fn scan(&self, base: &str, head: &str) -> Result<ScanResult, AppError> {
        let mut progress = ScanProgress::new(self.show_progress);
        let mut result = ScanResult::default();

        // Step 1: Validate revisions
        self.provider.verify_revision(base)?;
        self.provider.verify_revision(head)?;

        // Step 2: Find changed lock files
        progress.listing(base, head);
        let changed = self.provider.changed_files(base, head)?;
        progress.clear();

        let lock_files: Vec<(PathBuf, LockFileKind)> = changed
            .into_iter()
            .filter_map(|path| LockFileKind::from_path(&path).map(|kind| (path, kind)))
            .collect();
        info!(base, head, lock_files = lock_files.len(), "scanning lock files");

        if lock_files.is_empty() {
            return Ok(result);
        }

        // Step 3: Diff each lock file
        let mut pool = PackagePool::new();
        progress.diffing(lock_files.len());

        for (path, kind) in lock_files {
            progress.file_started(&path);

            match self.scan_file(&path, kind, base, head, &mut pool) {
                Ok(diff) => {
                    debug!(path = %path.display(), changes = diff.count(), "diffed lock file");
                    result.diffs.insert(path, diff);
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping lock file");
                    result.errors.push(error);
                }
            }
            progress.file_finished();
        }
        progress.clear();

        Ok(result)
    }

    fn scan_file(
        &self,
        path: &Path,
        kind: LockFileKind,
        base: &str,
        head: &str,
        pool: &mut PackagePool,
    ) -> Result<DependencyCollectionDiff, ScanError> {
        let parser = get_parser(kind);

        let read = |revision: &str| {
            self.provider
                .content(path, revision)
                .map_err(|e| ScanError::ReadError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
        };
        let before_content = read(base)?;
        let after_content = read(head)?;

        let before = parser
            .parse(before_content.as_deref(), pool)
            .map_err(|e| parse_error(path, base, e))?;
        let after = parser
            .parse(after_content.as_deref(), pool)
            .map_err(|e| parse_error(path, head, e))?;

        Ok(self.differ.diff(&before, &after))
    }
}

fn parse_error(path: &Path, revision: &str, error: LockFileError) -> ScanError {
    ScanError::ParseError {
        path: path.to_path_buf(),
        revision: revision.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionDiffType;
    use crate::error::VcsError;
    use std::collections::HashMap;

    /// In-memory provider: (path, revision) → content
    #[derive(Default)]
    struct MemoryProvider {
        revisions: Vec<&'static str>,
        changed: Vec<&'static str>,
        files: HashMap<(String, String), String>,
    }

    impl MemoryProvider {
        fn new(changed: &[&'static str]) -> Self {
            Self {
                revisions: vec!["base", "head"],
                changed: changed.to_vec(),
                files: HashMap::new(),
            }
        }

        fn with_file(mut self, path: &str, revision: &str, content: &str) -> Self {
            self.files
                .insert((path.to_string(), revision.to_string()), content.to_string());
            self
        }
    }

    impl RevisionContentProvider for MemoryProvider {
        fn verify_revision(&self, revision: &str) -> Result<(), VcsError> {
            if self.revisions.contains(&revision) {
                Ok(())
            } else {
                Err(VcsError::unknown_revision(revision))
            }
        }

        fn changed_files(&self, _base: &str, _head: &str) -> Result<Vec<PathBuf>, VcsError> {
            Ok(self.changed.iter().map(PathBuf::from).collect())
        }

        fn content(&self, path: &Path, revision: &str) -> Result<Option<String>, VcsError> {
            let key = (path.to_string_lossy().into_owned(), revision.to_string());
            Ok(self.files.get(&key).cloned())
        }
    }

    fn cargo_lock(packages: &[(&str, &str)]) -> String {
        packages
            .iter()
            .map(|(name, version)| {
                format!("[[package]]\nname = \"{}\"\nversion = \"{}\"\n\n", name, version)
            })
            .collect()
    }

    #[test]
    fn test_scan_ignores_non_lock_files() {
        let provider = MemoryProvider::new(&["README.md", "src/main.rs"]);
        let result = Scanner::new(provider).scan("base", "head").unwrap();
        assert!(result.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_scan_diffs_changed_lock_file() {
        let provider = MemoryProvider::new(&["Cargo.lock"])
            .with_file("Cargo.lock", "base", &cargo_lock(&[("a", "1.0.0"), ("b", "2.0.0")]))
            .with_file(
                "Cargo.lock",
                "head",
                &cargo_lock(&[("a", "1.0.0"), ("b", "3.0.0"), ("c", "1.0.0")]),
            );

        let result = Scanner::new(provider).scan("base", "head").unwrap();

        let diff = &result.diffs[&PathBuf::from("Cargo.lock")];
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.updated.len(), 1);
        assert_eq!(diff.updated[0].version_diff.kind, VersionDiffType::Upgraded);
        assert_eq!(result.total_changes(), 2);
    }

    #[test]
    fn test_scan_new_lock_file() {
        let provider = MemoryProvider::new(&["Cargo.lock"])
            .with_file("Cargo.lock", "head", &cargo_lock(&[("a", "1.0.0")]));

        let result = Scanner::new(provider).scan("base", "head").unwrap();

        let diff = &result.diffs[&PathBuf::from("Cargo.lock")];
        assert_eq!(diff.added.len(), 1);
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_scan_deleted_lock_file() {
        let provider = MemoryProvider::new(&["Cargo.lock"])
            .with_file("Cargo.lock", "base", &cargo_lock(&[("a", "1.0.0")]));

        let result = Scanner::new(provider).scan("base", "head").unwrap();

        assert_eq!(result.diffs[&PathBuf::from("Cargo.lock")].removed.len(), 1);
    }

    #[test]
    fn test_scan_lock_file_without_dependency_changes() {
        let content = cargo_lock(&[("a", "1.0.0")]);
        let provider = MemoryProvider::new(&["Cargo.lock"])
            .with_file("Cargo.lock", "base", &format!("version = 3\n\n{}", content))
            .with_file("Cargo.lock", "head", &format!("version = 4\n\n{}", content));

        let result = Scanner::new(provider).scan("base", "head").unwrap();

        assert_eq!(result.diffs.len(), 1);
        assert_eq!(result.total_changes(), 0);
    }

    #[test]
    fn test_scan_records_parse_error_and_continues() {
        let provider = MemoryProvider::new(&["Cargo.lock", "web/package-lock.json"])
            .with_file("Cargo.lock", "base", "[[package]")
            .with_file(
                "web/package-lock.json",
                "head",
                r#"{"packages": {"node_modules/left-pad": {"version": "1.3.0"}}}"#,
            );

        let result = Scanner::new(provider).scan("base", "head").unwrap();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path(), Path::new("Cargo.lock"));
        assert!(result.errors[0].to_string().contains("at base"));
        assert_eq!(result.diffs.len(), 1);
        assert!(result.diffs.contains_key(&PathBuf::from("web/package-lock.json")));
    }

    #[test]
    fn test_scan_unknown_revision_fails() {
        let provider = MemoryProvider::new(&["Cargo.lock"]);
        let err = Scanner::new(provider).scan("base", "missing").unwrap_err();
        assert!(matches!(err, AppError::Vcs(VcsError::UnknownRevision { .. })));
    }

    #[test]
    fn test_scan_preserves_file_order() {
        let provider = MemoryProvider::new(&["z/Cargo.lock", "a/uv.lock", "m/composer.lock"]);
        let result = Scanner::new(provider).scan("base", "head").unwrap();
        let paths: Vec<_> = result.diffs.keys().cloned().collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("z/Cargo.lock"),
                PathBuf::from("a/uv.lock"),
                PathBuf::from("m/composer.lock")
            ]
        );
    }
}
