//! Package identity and deduplication pool

use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name-based identity of a dependency, independent of its version
///
/// Two packages are equal iff their names are equal (case-sensitive).
/// Cloning is cheap: the name is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Package {
    name: Arc<str>,
}

impl Package {
    /// Creates a new package
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
        }
    }

    /// Returns the package name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Borrow<str> for Package {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Package {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// Index from name to [`Package`] so repeated references share one allocation
#[derive(Debug, Default)]
pub struct PackagePool {
    packages: HashMap<String, Package>,
}

impl PackagePool {
    /// Creates an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pooled package for `name`, creating it on first use
    pub fn intern(&mut self, name: &str) -> Package {
        if let Some(package) = self.packages.get(name) {
            return package.clone();
        }

        let package = Package::new(name);
        self.packages.insert(name.to_string(), package.clone());
        package
    }

    /// Returns the pooled package for `name`, if any
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Number of distinct packages in the pool
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
