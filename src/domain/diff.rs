//! Diff result types for versions and dependency collections

use super::{Dependency, Package};
use crate::versioning::Version;
use serde::Serialize;
use std::fmt;

/// Direction of a version change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionDiffType {
    /// The new version orders after the old one
    Upgraded,
    /// The new version orders before the old one
    Downgraded,
    /// The versions differ but no order could be established
    Unknown,
}

impl VersionDiffType {
    /// Returns the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionDiffType::Upgraded => "upgraded",
            VersionDiffType::Downgraded => "downgraded",
            VersionDiffType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VersionDiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Before/after versions of one package together with the change direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    pub before: Version,
    pub after: Version,
    #[serde(rename = "type")]
    pub kind: VersionDiffType,
}

impl VersionDiff {
    pub fn new(before: Version, after: Version, kind: VersionDiffType) -> Self {
        Self {
            before,
            after,
            kind,
        }
    }
}

/// An entry of [`DependencyCollectionDiff::updated`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyDiff {
    pub package: Package,
    #[serde(flatten)]
    pub version_diff: VersionDiff,
}

impl DependencyDiff {
    pub fn new(package: Package, version_diff: VersionDiff) -> Self {
        Self {
            package,
            version_diff,
        }
    }
}

/// Added, removed and updated dependencies between two collections
///
/// A package appears in at most one of the three lists. Packages whose
/// version string did not change are not listed at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyCollectionDiff {
    pub added: Vec<Dependency>,
    pub removed: Vec<Dependency>,
    pub updated: Vec<DependencyDiff>,
}

impl DependencyCollectionDiff {
    /// Total number of added, updated and removed entries
    pub fn count(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }

    /// Returns true if the dependency set did not change
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of updates classified as `kind`
    pub fn count_of(&self, kind: VersionDiffType) -> usize {
        self.updated
            .iter()
            .filter(|d| d.version_diff.kind == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(name: &str, version: &str) -> Dependency {
        Dependency::new(Package::new(name), Version::parse(version))
    }

    #[test]
    fn test_count() {
        let diff = DependencyCollectionDiff {
            added: vec![dep("a", "1.0.0")],
            removed: vec![dep("b", "1.0.0"), dep("c", "1.0.0")],
            updated: vec![DependencyDiff::new(
                Package::new("d"),
                VersionDiff::new(
                    Version::parse("1.0.0"),
                    Version::parse("2.0.0"),
                    VersionDiffType::Upgraded,
                ),
            )],
        };
        assert_eq!(diff.count(), 4);
        assert!(!diff.is_empty());
        assert_eq!(diff.count_of(VersionDiffType::Upgraded), 1);
        assert_eq!(diff.count_of(VersionDiffType::Downgraded), 0);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(DependencyCollectionDiff::default().is_empty());
    }

    #[test]
    fn test_serde_dependency_diff() {
        let diff = DependencyDiff::new(
            Package::new("tokio"),
            VersionDiff::new(
                Version::parse("1.48.0"),
                Version::parse("1.47.0"),
                VersionDiffType::Downgraded,
            ),
        );
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["package"], "tokio");
        assert_eq!(json["before"], "1.48.0");
        assert_eq!(json["after"], "1.47.0");
        assert_eq!(json["type"], "downgraded");
    }

    #[test]
    fn test_version_diff_type_display() {
        assert_eq!(VersionDiffType::Upgraded.to_string(), "upgraded");
        assert_eq!(VersionDiffType::Unknown.label(), "unknown");
    }
}
