//! Cargo.lock parser for Rust projects
//!
//! Reads the `[[package]]` entries. A crate locked at several versions keeps
//! its first entry.

use super::{parse_toml_packages, LockFileParser};
use crate::domain::{DependencyCollection, LockFileKind, PackagePool};
use crate::error::LockFileError;

/// Parser for Cargo.lock files
pub struct CargoLockParser;

impl LockFileParser for CargoLockParser {
    fn parse(
        &self,
        content: Option<&str>,
        pool: &mut PackagePool,
    ) -> Result<DependencyCollection, LockFileError> {
        parse_toml_packages(content, LockFileKind::Cargo, pool)
    }

    fn kind(&self) -> LockFileKind {
        LockFileKind::Cargo
    }
}
