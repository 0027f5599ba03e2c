//! poetry.lock and uv.lock parsers for Python projects
//!
//! Both formats list resolved distributions as `[[package]]` tables with
//! `name` and `version`. Versions that are not valid semver (`2.0`, `1.0rc1`)
//! parse as numeric versions.

use super::{parse_toml_packages, LockFileParser};
use crate::domain::{DependencyCollection, LockFileKind, PackagePool};
use crate::error::LockFileError;

/// Parser for Python lock files
pub struct PythonLockParser {
    kind: LockFileKind,
}

impl PythonLockParser {
    /// Parser for poetry.lock
    pub fn poetry() -> Self {
        Self {
            kind: LockFileKind::Poetry,
        }
    }

    /// Parser for uv.lock
    pub fn uv() -> Self {
        Self {
            kind: LockFileKind::Uv,
        }
    }
}

impl LockFileParser for PythonLockParser {
    fn parse(
        &self,
        content: Option<&str>,
        pool: &mut PackagePool,
    ) -> Result<DependencyCollection, LockFileError> {
        parse_toml_packages(content, self.kind, pool)
    }

    fn kind(&self) -> LockFileKind {
        self.kind
    }
}
