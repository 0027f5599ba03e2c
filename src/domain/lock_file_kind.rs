//! Lock file kinds for supported package ecosystems

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported lock file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockFileKind {
    /// Rust (Cargo.lock)
    Cargo,
    /// PHP (composer.lock)
    Composer,
    /// Node.js (package-lock.json)
    Npm,
    /// Python (poetry.lock)
    Poetry,
    /// Python (uv.lock)
    Uv,
}

impl LockFileKind {
    /// Returns the lock filename for this kind
    pub fn filename(&self) -> &'static str {
        match self {
            LockFileKind::Cargo => "Cargo.lock",
            LockFileKind::Composer => "composer.lock",
            LockFileKind::Npm => "package-lock.json",
            LockFileKind::Poetry => "poetry.lock",
            LockFileKind::Uv => "uv.lock",
        }
    }

    /// Returns the display name of the owning package manager
    pub fn display_name(&self) -> &'static str {
        match self {
            LockFileKind::Cargo => "Cargo",
            LockFileKind::Composer => "Composer",
            LockFileKind::Npm => "npm",
            LockFileKind::Poetry => "Poetry",
            LockFileKind::Uv => "uv",
        }
    }

    /// Detects the kind from a path by its file name
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.filename() == file_name)
    }

    /// Returns all supported kinds
    pub fn all() -> &'static [LockFileKind] {
        &[
            LockFileKind::Cargo,
            LockFileKind::Composer,
            LockFileKind::Npm,
            LockFileKind::Poetry,
            LockFileKind::Uv,
        ]
    }
}

impl fmt::Display for LockFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
