//! Semantic versions
//!
//! Ordering follows semver precedence: major, minor and patch, then
//! prerelease (a prerelease orders before the release). Build metadata is
//! ignored for ordering.

use super::{Scheme, Version, VersionComparator};
use std::cmp::Ordering;
use std::fmt;

/// A semantic version, optionally written with a leading `v`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemVerVersion {
    version: semver::Version,
    v_prefix: bool,
}

impl SemVerVersion {
    /// Parses `1.2.3`, `v1.2.3`, `1.2.3-rc.1+build`
    pub fn parse(raw: &str) -> Option<Self> {
        let (rest, v_prefix) = match raw.strip_prefix('v') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        let version = semver::Version::parse(rest).ok()?;
        Some(Self { version, v_prefix })
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    /// Prerelease identifiers, empty for a release
    pub fn pre(&self) -> &str {
        self.version.pre.as_str()
    }

    /// Build metadata, empty if absent
    pub fn build(&self) -> &str {
        self.version.build.as_str()
    }

    /// Compares by semver precedence, ignoring build metadata
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.version.cmp_precedence(&other.version)
    }
}

impl fmt::Display for SemVerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.v_prefix {
            f.write_str("v")?;
        }
        write!(f, "{}", self.version)
    }
}

/// Orders two semantic versions
#[derive(Debug, Default, Clone, Copy)]
pub struct SemVerComparator;

impl VersionComparator for SemVerComparator {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn supports(&self, before: Scheme, after: Scheme) -> bool {
        before == Scheme::SemVer && after == Scheme::SemVer
    }

    fn compare(&self, before: &Version, after: &Version) -> Option<Ordering> {
        match (before, after) {
            (Version::SemVer(a), Version::SemVer(b)) => Some(a.cmp_precedence(b)),
            _ => None,
        }
    }
}
