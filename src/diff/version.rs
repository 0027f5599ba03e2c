//! Version diff classification

use crate::domain::{VersionDiff, VersionDiffType};
use crate::versioning::{Version, VersionComparatorResolver};
use std::cmp::Ordering;

/// Classifies a before/after version pair of one package
#[derive(Debug, Default)]
pub struct VersionDiffer {
    resolver: VersionComparatorResolver,
}

impl VersionDiffer {
    /// Create a differ backed by the given resolver
    pub fn new(resolver: VersionComparatorResolver) -> Self {
        Self { resolver }
    }

    /// Classify the change from `before` to `after`
    ///
    /// Equal ordering with a different string form, textually identical
    /// versions and unresolvable scheme pairs are all `Unknown`.
    pub fn diff(&self, before: &Version, after: &Version) -> VersionDiff {
        VersionDiff::new(before.clone(), after.clone(), self.classify(before, after))
    }

    /// Determine only the direction of the change
    pub fn classify(&self, before: &Version, after: &Version) -> VersionDiffType {
        if before.to_string() == after.to_string() {
            return VersionDiffType::Unknown;
        }

        let Some(comparator) = self.resolver.resolve(before, after) else {
            return VersionDiffType::Unknown;
        };

        match comparator.compare(before, after) {
            Some(Ordering::Less) => VersionDiffType::Upgraded,
            Some(Ordering::Greater) => VersionDiffType::Downgraded,
            Some(Ordering::Equal) | None => VersionDiffType::Unknown,
        }
    }
}
