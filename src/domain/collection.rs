//! Ordered, name-unique dependency collections

use super::{Dependency, Package};
use indexmap::IndexMap;

/// The dependencies parsed from one lock file at one revision
///
/// Insertion order is preserved and no two entries share a package name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyCollection {
    dependencies: IndexMap<Package, Dependency>,
}

impl DependencyCollection {
    /// Creates a collection, keeping the first dependency seen for each package
    pub fn new(dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        let mut builder = Self::builder();
        for dependency in dependencies {
            builder.push(dependency);
        }
        builder.build()
    }

    /// Creates an empty collection
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts building a collection
    pub fn builder() -> DependencyCollectionBuilder {
        DependencyCollectionBuilder::default()
    }

    /// Looks up a dependency by package name
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.get(name)
    }

    /// Returns true if the package is part of this collection
    pub fn contains(&self, package: &Package) -> bool {
        self.dependencies.contains_key(package)
    }

    /// Iterates dependencies in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.values()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl FromIterator<Dependency> for DependencyCollection {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a DependencyCollection {
    type Item = &'a Dependency;
    type IntoIter = indexmap::map::Values<'a, Package, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.values()
    }
}

/// Incremental construction of a [`DependencyCollection`]
#[derive(Debug, Default)]
pub struct DependencyCollectionBuilder {
    dependencies: IndexMap<Package, Dependency>,
}

impl DependencyCollectionBuilder {
    /// Adds a dependency; returns false (and drops it) if its package is already present
    pub fn push(&mut self, dependency: Dependency) -> bool {
        if self.dependencies.contains_key(&dependency.package) {
            return false;
        }
        self.dependencies
            .insert(dependency.package.clone(), dependency);
        true
    }

    pub fn build(self) -> DependencyCollection {
        DependencyCollection {
            dependencies: self.dependencies,
        }
    }
}
