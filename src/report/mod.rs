//! Reporters delivering scan results to external services
//!
//! This module provides:
//! - The `Reporter` trait
//! - `ReportRunner`, which invokes every active reporter and isolates failures
//! - HTTP client shared foundation with retry logic
//! - GitHub pull request comment reporter

mod client;
mod github;

pub use client::{ApiRequest, HttpClient};
pub use github::{GitHubConfig, GitHubReporter, COMMENT_MARKER};

use crate::domain::DependencyCollectionDiff;
use crate::error::ReportError;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Trait for reporters
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Human-readable reporter name
    fn name(&self) -> &'static str;

    /// Whether the reporter is configured for this run
    fn supports(&self) -> bool;

    /// Deliver the diffs
    async fn report(
        &self,
        diffs: &IndexMap<PathBuf, DependencyCollectionDiff>,
    ) -> Result<(), ReportError>;
}

/// A reporter that failed during [`ReportRunner::run`]
#[derive(Debug)]
pub struct ReportFailure {
    pub reporter: &'static str,
    pub error: ReportError,
}

/// Runs every supporting reporter in registration order
#[derive(Default)]
pub struct ReportRunner {
    reporters: Vec<Box<dyn Reporter>>,
}

impl ReportRunner {
    pub fn new(reporters: Vec<Box<dyn Reporter>>) -> Self {
        Self { reporters }
    }

    /// Add a reporter
    pub fn register(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporters.push(reporter);
        self
    }

    /// Number of registered reporters
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    /// Invoke every reporter that supports this run
    ///
    /// A failing reporter is logged and collected; the remaining reporters
    /// still run.
    pub async fn run(
        &self,
        diffs: &IndexMap<PathBuf, DependencyCollectionDiff>,
    ) -> Vec<ReportFailure> {
        let mut failures = Vec::new();

        for reporter in &self.reporters {
            if !reporter.supports() {
                debug!(reporter = reporter.name(), "reporter not configured, skipping");
                continue;
            }

            match reporter.report(diffs).await {
                Ok(()) => info!(reporter = reporter.name(), "report delivered"),
                Err(e) => {
                    error!(reporter = reporter.name(), error = %e, "reporter failed");
                    failures.push(ReportFailure {
                        reporter: reporter.name(),
                        error: e,
                    });
                }
            }
        }

        failures
    }
}
