//! Dependency information structures

use super::Package;
use crate::versioning::Version;
use serde::Serialize;
use std::fmt;

/// A package pinned to one version in a lock file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Package identity
    pub package: Package,
    /// Locked version
    pub version: Version,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(package: Package, version: Version) -> Self {
        Self { package, version }
    }

    /// Returns the package name
    pub fn name(&self) -> &str {
        self.package.name()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.package, self.version)
    }
}
