//! package-lock.json parser for Node.js projects
//!
//! Handles:
//! - lockfile v2/v3 `packages` map keyed by install path
//!   (`node_modules/a/node_modules/b` is package `b`)
//! - lockfile v1 nested `dependencies` tree
//! - Scoped packages (`@scope/name`)
//!
//! The root project entry and linked workspace entries carry no version and
//! are skipped.

use super::{non_blank, push_dependency, LockFileParser};
use crate::domain::{DependencyCollection, LockFileKind, PackagePool};
use crate::error::LockFileError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::VecDeque;

/// Parser for package-lock.json files
pub struct PackageLockParser;

const NODE_MODULES: &str = "node_modules/";

#[derive(Debug, Deserialize)]
struct PackageLock {
    packages: Option<IndexMap<String, InstalledPackage>>,
    dependencies: Option<IndexMap<String, LegacyDependency>>,
}

#[derive(Debug, Deserialize)]
struct InstalledPackage {
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LegacyDependency {
    version: Option<String>,
    #[serde(default)]
    dependencies: IndexMap<String, LegacyDependency>,
}

/// Package name from an install path, None for the root and workspace folders
fn package_name(install_path: &str) -> Option<&str> {
    install_path
        .rfind(NODE_MODULES)
        .map(|idx| &install_path[idx + NODE_MODULES.len()..])
        .filter(|name| !name.is_empty())
}

/// Number of `node_modules/` segments in an install path
fn nesting_depth(install_path: &str) -> usize {
    install_path.matches(NODE_MODULES).count()
}

impl LockFileParser for PackageLockParser {
    fn parse(
        &self,
        content: Option<&str>,
        pool: &mut PackagePool,
    ) -> Result<DependencyCollection, LockFileError> {
        let Some(content) = non_blank(content) else {
            return Ok(DependencyCollection::empty());
        };

        let lock: PackageLock = serde_json::from_str(content)
            .map_err(|e| LockFileError::json_parse_error(self.kind(), e.to_string()))?;

        let mut builder = DependencyCollection::builder();

        if let Some(packages) = &lock.packages {
            // Keys are sorted by path, so nested copies can precede the hoisted
            // one; a stable sort by depth lets the hoisted entry win
            let mut installed: Vec<(usize, &str, &str)> = packages
                .iter()
                .filter_map(|(install_path, package)| {
                    let name = package_name(install_path)?;
                    let version = package.version.as_deref()?;
                    Some((nesting_depth(install_path), name, version))
                })
                .collect();
            installed.sort_by_key(|(depth, _, _)| *depth);

            for (_, name, version) in installed {
                push_dependency(&mut builder, pool, self.kind(), name, version);
            }
            return Ok(builder.build());
        }

        // Lockfile v1: walk the tree breadth-first so hoisted entries win
        let mut queue: VecDeque<&IndexMap<String, LegacyDependency>> = VecDeque::new();
        if let Some(dependencies) = &lock.dependencies {
            queue.push_back(dependencies);
        }
        while let Some(level) = queue.pop_front() {
            for (name, dependency) in level {
                if let Some(version) = &dependency.version {
                    push_dependency(&mut builder, pool, self.kind(), name, version);
                }
                if !dependency.dependencies.is_empty() {
                    queue.push_back(&dependency.dependencies);
                }
            }
        }

        Ok(builder.build())
    }

    fn kind(&self) -> LockFileKind {
        LockFileKind::Npm
    }
}
