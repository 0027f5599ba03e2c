//! Polymorphic versions and scheme-aware comparison
//!
//! A [`Version`] is one variant per versioning scheme. Ordering two versions
//! goes through a [`VersionComparatorResolver`], which picks the first
//! registered [`VersionComparator`] that supports the pair of schemes, so the
//! diff engine never matches on concrete variants itself.
//!
//! - [`semver`]: semantic versions and their comparator
//! - [`numeric`]: dotted release numbers with an optional suffix
//! - [`comparator`]: the comparator trait and the resolver

pub mod comparator;
pub mod numeric;
pub mod semver;

pub use comparator::{VersionComparator, VersionComparatorResolver};
pub use numeric::{NumericComparator, NumericVersion};
pub use self::semver::{SemVerComparator, SemVerVersion};

use serde::{Serialize, Serializer};
use std::fmt;

/// Identity of a versioning scheme, i.e. the variant of a [`Version`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    SemVer,
    Numeric,
    Opaque,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::SemVer => "semver",
            Scheme::Numeric => "numeric",
            Scheme::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// A parsed version under one specific scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// Semantic version (`1.2.3-beta.1+build`)
    SemVer(SemVerVersion),
    /// Dotted release numbers (`1.2`, `2.0.0.1`, `1.0rc1`)
    Numeric(NumericVersion),
    /// Anything else (`dev-main`, commit references); never ordered
    Opaque(String),
}

impl Version {
    /// Parses a version string, trying semver, then numeric, then falling back to opaque
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if is_development_branch(trimmed) {
            return Version::Opaque(trimmed.to_string());
        }
        if let Some(version) = SemVerVersion::parse(trimmed) {
            return Version::SemVer(version);
        }
        if let Some(version) = NumericVersion::parse(trimmed) {
            return Version::Numeric(version);
        }
        Version::Opaque(trimmed.to_string())
    }

    /// Creates an opaque version without attempting to parse it
    pub fn opaque(raw: impl Into<String>) -> Self {
        Version::Opaque(raw.into())
    }

    /// Returns the scheme of this version
    pub fn scheme(&self) -> Scheme {
        match self {
            Version::SemVer(_) => Scheme::SemVer,
            Version::Numeric(_) => Scheme::Numeric,
            Version::Opaque(_) => Scheme::Opaque,
        }
    }
}

/// Composer-style branch references (`dev-main`, `2.x-dev`)
fn is_development_branch(raw: &str) -> bool {
    raw.starts_with("dev-") || raw.ends_with("-dev")
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::SemVer(v) => v.fmt(f),
            Version::Numeric(v) => v.fmt(f),
            Version::Opaque(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
