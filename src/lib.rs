//! lockdiff - Lock file diff scanner library
//!
//! This library compares the dependency sets recorded in lock files at two
//! revisions and classifies every change:
//! - Parsing lock files into dependency collections (`lockfile`)
//! - Version parsing and comparator resolution (`versioning`)
//! - Collection and version diffing (`diff`)
//! - Reading revisions from git (`vcs`) and orchestrating a scan (`scanner`)
//! - Rendering (`output`) and delivering (`report`) results

pub mod cli;
pub mod diff;
pub mod domain;
pub mod error;
pub mod lockfile;
pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod vcs;
pub mod versioning;
