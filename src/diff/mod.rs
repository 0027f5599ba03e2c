//! Diff engine for dependency collections
//!
//! This module provides:
//! - Version diff classification (upgraded / downgraded / unknown)
//! - Set difference of two dependency collections (added / removed / updated)
//!
//! Everything here is pure and synchronous; the engine never performs I/O.

mod collection;
mod version;

pub use collection::DependencyCollectionDiffer;
pub use version::VersionDiffer;
