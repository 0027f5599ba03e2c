//! Source control access
//!
//! This module provides:
//! - The revision content provider abstraction used by the scanner
//! - A git implementation shelling out to the `git` binary

mod git;

pub use git::GitRepository;

use crate::error::VcsError;
use std::path::{Path, PathBuf};

/// Trait for reading file contents at a revision
pub trait RevisionContentProvider {
    /// Fail unless `revision` resolves to a commit
    fn verify_revision(&self, revision: &str) -> Result<(), VcsError>;

    /// Paths changed between `base` and `head`, relative to the repository root
    fn changed_files(&self, base: &str, head: &str) -> Result<Vec<PathBuf>, VcsError>;

    /// Contents of `path` at `revision`, or None if the file does not exist there
    fn content(&self, path: &Path, revision: &str) -> Result<Option<String>, VcsError>;
}
