//! Core domain models for lockdiff
//!
//! This module contains the fundamental types used throughout the application:
//! - Package identity and the package pool
//! - Dependencies and ordered dependency collections
//! - Version and collection diff results
//! - Lock file kinds for supported ecosystems

mod collection;
mod dependency;
mod diff;
mod lock_file_kind;
mod package;

pub use collection::{DependencyCollection, DependencyCollectionBuilder};
pub use dependency::Dependency;
pub use diff::{DependencyCollectionDiff, DependencyDiff, VersionDiff, VersionDiffType};
pub use lock_file_kind::LockFileKind;
pub use package::{Package, PackagePool};
