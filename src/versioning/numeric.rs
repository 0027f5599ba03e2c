//! Dotted numeric versions
//!
//! Handles versions that are not valid semver but still carry an order:
//! - Partial or long releases: `1.2`, `2024.1`, `1.2.3.4`
//! - PEP 440 style suffixes: `1.0rc1`, `2.0.post1`, `3.1.dev2`
//!
//! The [`NumericComparator`] also orders semantic versions against numeric
//! ones by viewing a semver as `[major, minor, patch]` plus its prerelease.

use super::{Scheme, Version, VersionComparator};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+(?:\.\d+)*)(?:[.\-_]?([A-Za-z][0-9A-Za-z.\-_]*))?$").unwrap()
});

/// Suffix labels that order before the bare release
const PRE_RELEASE_LABELS: &[&str] = &["a", "alpha", "b", "beta", "c", "rc", "pre", "preview", "dev"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SuffixClass {
    PreRelease,
    Release,
    PostRelease,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Suffix {
    class: SuffixClass,
    label: String,
    number: u64,
    raw: String,
}

impl Suffix {
    fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        let label: String = lower.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
        let rest = lower[label.len()..].trim_start_matches(['.', '-', '_']);
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        let number = digits.parse().unwrap_or(0);

        let class = if PRE_RELEASE_LABELS.contains(&label.as_str()) {
            SuffixClass::PreRelease
        } else {
            SuffixClass::PostRelease
        };

        Self {
            class,
            label,
            number,
            raw: raw.to_string(),
        }
    }

    /// A semver prerelease always orders before its release
    fn semver_prerelease(pre: &str) -> Self {
        Self {
            class: SuffixClass::PreRelease,
            ..Self::parse(pre)
        }
    }

    fn class_of(suffix: Option<&Suffix>) -> SuffixClass {
        suffix.map_or(SuffixClass::Release, |s| s.class)
    }

    fn cmp_opt(a: Option<&Suffix>, b: Option<&Suffix>) -> Ordering {
        Self::class_of(a)
            .cmp(&Self::class_of(b))
            .then_with(|| match (a, b) {
                (Some(a), Some(b)) => a
                    .label
                    .cmp(&b.label)
                    .then(a.number.cmp(&b.number))
                    .then_with(|| a.raw.cmp(&b.raw)),
                _ => Ordering::Equal,
            })
    }
}

/// A version made of dot-separated release numbers and an optional suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericVersion {
    raw: String,
    release: Vec<u64>,
    suffix: Option<Suffix>,
}

impl NumericVersion {
    /// Parses `1.2`, `v2024.1`, `1.0rc1`; returns None for anything else
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = NUMERIC_RE.captures(raw)?;
        let release = caps
            .get(1)?
            .as_str()
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        let suffix = caps.get(2).map(|m| Suffix::parse(m.as_str()));

        Some(Self {
            raw: raw.to_string(),
            release,
            suffix,
        })
    }

    /// The release numbers, in order
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// The suffix following the release numbers, if any
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_ref().map(|s| s.raw.as_str())
    }
}

impl fmt::Display for NumericVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Release numbers compared with missing components treated as zero
fn cmp_release(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn numeric_key(version: &Version) -> Option<(Vec<u64>, Option<Suffix>)> {
    match version {
        Version::Numeric(v) => Some((v.release.clone(), v.suffix.clone())),
        Version::SemVer(v) => {
            let suffix = (!v.pre().is_empty()).then(|| Suffix::semver_prerelease(v.pre()));
            Some((vec![v.major(), v.minor(), v.patch()], suffix))
        }
        Version::Opaque(_) => None,
    }
}

/// Orders numeric versions, including numeric against semver in either direction
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericComparator;

impl NumericComparator {
    fn is_numeric_like(scheme: Scheme) -> bool {
        matches!(scheme, Scheme::Numeric | Scheme::SemVer)
    }
}

impl VersionComparator for NumericComparator {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn supports(&self, before: Scheme, after: Scheme) -> bool {
        Self::is_numeric_like(before) && Self::is_numeric_like(after)
    }

    fn compare(&self, before: &Version, after: &Version) -> Option<Ordering> {
        let (before_release, before_suffix) = numeric_key(before)?;
        let (after_release, after_suffix) = numeric_key(after)?;

        Some(
            cmp_release(&before_release, &after_release).then_with(|| {
                Suffix::cmp_opt(before_suffix.as_ref(), after_suffix.as_ref())
            }),
        )
    }
}
