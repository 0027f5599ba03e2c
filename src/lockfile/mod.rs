//! Lock file parsing
//!
//! This module provides one parser per supported lock file format:
//! - Cargo.lock
//! - composer.lock
//! - package-lock.json (lockfile v1, v2 and v3)
//! - poetry.lock and uv.lock
//!
//! Every parser accepts absent content (the file did not exist at that
//! revision) and returns an empty collection for it.

mod cargo_lock;
mod composer_lock;
mod package_lock;
mod python_lock;

pub use cargo_lock::CargoLockParser;
pub use composer_lock::ComposerLockParser;
pub use package_lock::PackageLockParser;
pub use python_lock::PythonLockParser;

use crate::domain::{
    Dependency, DependencyCollection, DependencyCollectionBuilder, LockFileKind, PackagePool,
};
use crate::error::LockFileError;
use crate::versioning::Version;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Trait for parsing lock files
pub trait LockFileParser {
    /// Parse the dependencies locked in `content`
    ///
    /// `None` or blank content yields an empty collection.
    fn parse(
        &self,
        content: Option<&str>,
        pool: &mut PackagePool,
    ) -> Result<DependencyCollection, LockFileError>;

    /// Returns the lock file kind this parser handles
    fn kind(&self) -> LockFileKind;
}

/// Get a lock file parser for the specified kind
pub fn get_parser(kind: LockFileKind) -> Box<dyn LockFileParser> {
    match kind {
        LockFileKind::Cargo => Box::new(CargoLockParser),
        LockFileKind::Composer => Box::new(ComposerLockParser),
        LockFileKind::Npm => Box::new(PackageLockParser),
        LockFileKind::Poetry => Box::new(PythonLockParser::poetry()),
        LockFileKind::Uv => Box::new(PythonLockParser::uv()),
    }
}

/// Get a lock file parser for a path, by its file name
pub fn parser_for_path(path: &Path) -> Result<Box<dyn LockFileParser>, LockFileError> {
    LockFileKind::from_path(path)
        .map(get_parser)
        .ok_or_else(|| LockFileError::unsupported_format(path))
}

/// Returns the content to parse, or None if the file is absent or blank
fn non_blank(content: Option<&str>) -> Option<&str> {
    content.filter(|c| !c.trim().is_empty())
}

/// Add a dependency to the builder, logging dropped duplicates
fn push_dependency(
    builder: &mut DependencyCollectionBuilder,
    pool: &mut PackagePool,
    kind: LockFileKind,
    name: &str,
    version: &str,
) {
    let dependency = Dependency::new(pool.intern(name), Version::parse(version));
    if !builder.push(dependency) {
        debug!(lock_file = kind.filename(), package = name, version, "duplicate package entry ignored");
    }
}

/// `[[package]]` array shared by Cargo.lock, poetry.lock and uv.lock
#[derive(Debug, Deserialize)]
struct TomlLockFile {
    #[serde(default)]
    package: Vec<TomlLockPackage>,
}

#[derive(Debug, Deserialize)]
struct TomlLockPackage {
    name: String,
    version: Option<String>,
}

fn parse_toml_packages(
    content: Option<&str>,
    kind: LockFileKind,
    pool: &mut PackagePool,
) -> Result<DependencyCollection, LockFileError> {
    let Some(content) = non_blank(content) else {
        return Ok(DependencyCollection::empty());
    };

    let lock: TomlLockFile = toml::from_str(content)
        .map_err(|e| LockFileError::toml_parse_error(kind, e.to_string()))?;

    let mut builder = DependencyCollection::builder();
    for package in &lock.package {
        match package.version.as_deref() {
            Some(version) => push_dependency(&mut builder, pool, kind, &package.name, version),
            None => debug!(lock_file = kind.filename(), package = %package.name, "package without version skipped"),
        }
    }

    Ok(builder.build())
}
