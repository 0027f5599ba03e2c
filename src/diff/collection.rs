//! Set difference of two dependency collections

use super::VersionDiffer;
use crate::domain::{DependencyCollection, DependencyCollectionDiff, DependencyDiff};

/// Computes added, removed and updated dependencies between two collections
#[derive(Debug, Default)]
pub struct DependencyCollectionDiffer {
    version_differ: VersionDiffer,
}

impl DependencyCollectionDiffer {
    /// Create a differ with a custom version differ
    pub fn new(version_differ: VersionDiffer) -> Self {
        Self { version_differ }
    }

    /// Diff `before` against `after`
    ///
    /// `added` follows the order of `after`; `removed` and `updated` follow
    /// the order of `before`.
    pub fn diff(
        &self,
        before: &DependencyCollection,
        after: &DependencyCollection,
    ) -> DependencyCollectionDiff {
        let mut result = DependencyCollectionDiff::default();

        for dependency in after {
            if !before.contains(&dependency.package) {
                result.added.push(dependency.clone());
            }
        }

        for dependency in before {
            let Some(counterpart) = after.get(dependency.name()) else {
                result.removed.push(dependency.clone());
                continue;
            };

            if dependency.version.to_string() == counterpart.version.to_string() {
                continue;
            }

            let version_diff = self
                .version_differ
                .diff(&dependency.version, &counterpart.version);
            result
                .updated
                .push(DependencyDiff::new(dependency.package.clone(), version_diff));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dependency, Package, VersionDiffType};
    use crate::versioning::Version;
    use std::collections::HashSet;

    fn collection(entries: &[(&str, &str)]) -> DependencyCollection {
        entries
            .iter()
            .map(|(name, version)| Dependency::new(Package::new(name), Version::parse(version)))
            .collect()
    }

    fn diff(before: &DependencyCollection, after: &DependencyCollection) -> DependencyCollectionDiff {
        DependencyCollectionDiffer::default().diff(before, after)
    }

    fn names(deps: &[Dependency]) -> Vec<&str> {
        deps.iter().map(|d| d.name()).collect()
    }

    #[test]
    fn test_added_updated_scenario() {
        let before = collection(&[("A", "1.0.0"), ("B", "2.0.0")]);
        let after = collection(&[("A", "1.0.0"), ("B", "3.0.0"), ("C", "1.0.0")]);

        let result = diff(&before, &after);

        assert_eq!(names(&result.added), vec!["C"]);
        assert_eq!(result.added[0].version.to_string(), "1.0.0");
        assert!(result.removed.is_empty());
        assert_eq!(result.updated.len(), 1);
        assert_eq!(result.updated[0].package.name(), "B");
        assert_eq!(result.updated[0].version_diff.before.to_string(), "2.0.0");
        assert_eq!(result.updated[0].version_diff.after.to_string(), "3.0.0");
        assert_eq!(result.updated[0].version_diff.kind, VersionDiffType::Upgraded);
        assert_eq!(result.count(), 2);
    }

    #[test]
    fn test_empty_before_all_added() {
        let result = diff(&DependencyCollection::empty(), &collection(&[("A", "1.0.0")]));
        assert_eq!(names(&result.added), vec!["A"]);
        assert!(result.removed.is_empty());
        assert!(result.updated.is_empty());
    }

    #[test]
    fn test_empty_after_all_removed() {
        let result = diff(
            &collection(&[("A", "1.0.0"), ("B", "0.1.0")]),
            &DependencyCollection::empty(),
        );
        assert_eq!(names(&result.removed), vec!["A", "B"]);
        assert!(result.added.is_empty());
        assert!(result.updated.is_empty());
    }

    #[test]
    fn test_identical_collections() {
        let a = collection(&[("A", "1.0.0"), ("B", "dev-main"), ("C", "1.2")]);
        assert_eq!(diff(&a, &a).count(), 0);
        assert_eq!(diff(&DependencyCollection::empty(), &DependencyCollection::empty()).count(), 0);
    }

    #[test]
    fn test_incomparable_versions_still_updated() {
        let before = collection(&[("pkg", "1.0.0")]);
        let after = collection(&[("pkg", "dev-main")]);

        let result = diff(&before, &after);

        assert_eq!(result.updated.len(), 1);
        assert_eq!(result.updated[0].version_diff.kind, VersionDiffType::Unknown);
    }

    #[test]
    fn test_build_metadata_change_listed_as_unknown() {
        let result = diff(
            &collection(&[("pkg", "1.0.0")]),
            &collection(&[("pkg", "1.0.0+build2")]),
        );
        assert_eq!(result.updated.len(), 1);
        assert_eq!(result.updated[0].version_diff.kind, VersionDiffType::Unknown);
    }

    #[test]
    fn test_downgrade() {
        let result = diff(&collection(&[("pkg", "2.1.0")]), &collection(&[("pkg", "2.0.5")]));
        assert_eq!(result.updated[0].version_diff.kind, VersionDiffType::Downgraded);
    }

    #[test]
    fn test_order_follows_source_collections() {
        let before = collection(&[("z", "1.0.0"), ("y", "1.0.0"), ("x", "1.0.0"), ("w", "1.0.0")]);
        let after = collection(&[("n", "1.0.0"), ("x", "2.0.0"), ("m", "1.0.0"), ("z", "2.0.0")]);

        let result = diff(&before, &after);

        assert_eq!(names(&result.added), vec!["n", "m"]);
        assert_eq!(names(&result.removed), vec!["y", "w"]);
        let updated: Vec<_> = result.updated.iter().map(|d| d.package.name()).collect();
        assert_eq!(updated, vec!["z", "x"]);
    }

    #[test]
    fn test_partition_property() {
        let a = collection(&[("a", "1.0.0"), ("b", "1.0.0"), ("c", "1.0"), ("d", "dev-x")]);
        let b = collection(&[("b", "1.0.0"), ("c", "1.1"), ("d", "dev-y"), ("e", "0.1.0")]);

        let result = diff(&a, &b);

        let added: HashSet<_> = result.added.iter().map(|d| d.name()).collect();
        let removed: HashSet<_> = result.removed.iter().map(|d| d.name()).collect();
        let updated: HashSet<_> = result.updated.iter().map(|d| d.package.name()).collect();

        assert!(added.is_disjoint(&removed));
        assert!(added.is_disjoint(&updated));
        assert!(removed.is_disjoint(&updated));

        for name in &added {
            assert!(b.get(name).is_some() && a.get(name).is_none());
        }
        for name in &removed {
            assert!(a.get(name).is_some() && b.get(name).is_none());
        }
        for name in &updated {
            let before = a.get(name).unwrap().version.to_string();
            let after = b.get(name).unwrap().version.to_string();
            assert_ne!(before, after);
        }

        let unchanged: HashSet<_> = a
            .iter()
            .filter(|d| b.get(d.name()).map(|o| o.version == d.version).unwrap_or(false))
            .map(|d| d.name())
            .collect();
        let covered: HashSet<_> = added
            .iter()
            .chain(&removed)
            .chain(&updated)
            .chain(&unchanged)
            .copied()
            .collect();
        let all: HashSet<_> = a.iter().chain(b.iter()).map(|d| d.name()).collect();
        assert_eq!(covered, all);
    }
}
