//! Scan progress on stderr
//!
//! Two phases: a spinner while git lists the changed files, then a bar that
//! advances once per lock file and names the file being diffed.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Progress display for one scan
pub struct ScanProgress {
    /// Disabled in quiet and machine-readable modes, or when stderr is not a terminal
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl ScanProgress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Spinner shown while the changed files between `base` and `head` are listed
    pub fn listing(&mut self, base: &str, head: &str) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Listing changed files {}..{}", base, head));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.replace(spinner);
    }

    /// Bar over `total` lock files
    pub fn diffing(&mut self, total: usize) {
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg:40!} [{bar:30.cyan/blue}] {pos}/{len}")
        {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        self.replace(bar);
    }

    /// Name the lock file currently being diffed
    pub fn file_started(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            bar.set_message(path.display().to_string());
        }
    }

    /// Count one lock file as done, whatever its outcome
    pub fn file_finished(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Remove the display so the report starts on a clean line
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn replace(&mut self, bar: ProgressBar) {
        self.clear();
        self.bar = Some(bar);
    }

    /// Position of the current bar, if any
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(|bar| bar.position())
    }
}

impl Drop for ScanProgress {
    fn drop(&mut self) {
        self.clear();
    }
}
