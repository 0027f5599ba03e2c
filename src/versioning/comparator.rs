//! Version comparator abstraction and first-match resolution

use super::{NumericComparator, Scheme, SemVerComparator, Version};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Trait for scheme-specific version ordering
///
/// A comparator declares which scheme pairs it can order through
/// [`supports`](Self::supports); one comparator may support many pairs.
pub trait VersionComparator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Check whether this comparator can order a `before` / `after` scheme pair
    fn supports(&self, before: Scheme, after: Scheme) -> bool;

    /// Order `before` relative to `after`
    ///
    /// Returns None only when called with a pair it does not support.
    fn compare(&self, before: &Version, after: &Version) -> Option<Ordering>;
}

/// Ordered list of comparators, consulted in registration order
///
/// Register specific comparators ahead of broader ones: the first one whose
/// `supports` check passes wins.
pub struct VersionComparatorResolver {
    comparators: Vec<Box<dyn VersionComparator>>,
}

impl VersionComparatorResolver {
    /// Create a resolver over the given comparators
    pub fn new(comparators: Vec<Box<dyn VersionComparator>>) -> Self {
        Self { comparators }
    }

    /// Create a resolver with the built-in comparators (semver first, then numeric)
    pub fn with_defaults() -> Self {
        Self::new(vec![Box::new(SemVerComparator), Box::new(NumericComparator)])
    }

    /// Append a comparator after those already registered
    pub fn register(mut self, comparator: impl VersionComparator + 'static) -> Self {
        self.comparators.push(Box::new(comparator));
        self
    }

    /// Find the first comparator supporting the schemes of `before` and `after`
    ///
    /// Absence is an expected outcome meaning the versions are not comparable.
    pub fn resolve(&self, before: &Version, after: &Version) -> Option<&dyn VersionComparator> {
        let (before_scheme, after_scheme) = (before.scheme(), after.scheme());
        let resolved: Option<&dyn VersionComparator> = self
            .comparators
            .iter()
            .find(|c| c.supports(before_scheme, after_scheme))
            .map(|c| c.as_ref());

        match resolved {
            Some(comparator) => debug!(
                comparator = comparator.name(),
                %before_scheme,
                %after_scheme,
                "resolved version comparator"
            ),
            None => debug!(%before_scheme, %after_scheme, "no version comparator"),
        }

        resolved
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }
}

impl Default for VersionComparatorResolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for VersionComparatorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.comparators.iter().map(|c| c.name()))
            .finish()
    }
}
