//! composer.lock parser for PHP projects
//!
//! Handles:
//! - packages
//! - packages-dev (may be null in older lock files)
//! - Tagged versions with or without `v` prefix
//! - Branch versions (`dev-main`, `2.x-dev`) as opaque versions

use super::{non_blank, push_dependency, LockFileParser};
use crate::domain::{DependencyCollection, LockFileKind, PackagePool};
use crate::error::LockFileError;
use serde::Deserialize;

/// Parser for composer.lock files
pub struct ComposerLockParser;

#[derive(Debug, Deserialize)]
struct ComposerLock {
    #[serde(default)]
    packages: Vec<ComposerPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Option<Vec<ComposerPackage>>,
}

#[derive(Debug, Deserialize)]
struct ComposerPackage {
    name: String,
    version: String,
}

impl LockFileParser for ComposerLockParser {
    fn parse(
        &self,
        content: Option<&str>,
        pool: &mut PackagePool,
    ) -> Result<DependencyCollection, LockFileError> {
        let Some(content) = non_blank(content) else {
            return Ok(DependencyCollection::empty());
        };

        let lock: ComposerLock = serde_json::from_str(content)
            .map_err(|e| LockFileError::json_parse_error(self.kind(), e.to_string()))?;

        let mut builder = DependencyCollection::builder();
        let dev = lock.packages_dev.as_deref().unwrap_or_default();
        for package in lock.packages.iter().chain(dev) {
            push_dependency(&mut builder, pool, self.kind(), &package.name, &package.version);
        }

        Ok(builder.build())
    }

    fn kind(&self) -> LockFileKind {
        LockFileKind::Composer
    }
}
