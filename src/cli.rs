//! CLI argument parsing module for lockdiff

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lock file diff scanner
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lockdiff",
    version,
    about = "Show dependency changes in lock files between two git revisions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan lock file changes between two revisions
    Scan(ScanArgs),
}

/// Arguments of `lockdiff scan`
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Base revision (e.g. main, a commit hash)
    pub base: String,

    /// Head revision (e.g. HEAD, a branch name)
    pub head: String,

    /// Use the given directory as working directory (default: current directory)
    #[arg(short = 'd', long, default_value = ".")]
    pub working_dir: PathBuf,

    // Output options
    /// Output results in JSON format
    #[arg(long, conflicts_with = "markdown")]
    pub json: bool,

    /// Output results as Markdown tables
    #[arg(long)]
    pub markdown: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colors and emoji
    #[arg(long)]
    pub no_color: bool,

    /// Do not run reporters
    #[arg(long)]
    pub no_report: bool,
}

impl ScanArgs {
    /// Whether colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && !self.json && !self.markdown
    }

    /// Whether a progress bar should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json && !self.markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn scan_args(args: &[&str]) -> ScanArgs {
        let cli = Cli::parse_from(args);
        match cli.command {
            Command::Scan(args) => args,
        }
    }

    #[test]
    fn test_default_args() {
        let args = scan_args(&["lockdiff", "scan", "main", "HEAD"]);
        assert_eq!(args.base, "main");
        assert_eq!(args.head, "HEAD");
        assert_eq!(args.working_dir, PathBuf::from("."));
        assert!(!args.json);
        assert!(!args.markdown);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(!args.no_color);
        assert!(!args.no_report);
    }

    #[test]
    fn test_working_dir_short_flag() {
        let args = scan_args(&["lockdiff", "scan", "a", "b", "-d", "/repo"]);
        assert_eq!(args.working_dir, PathBuf::from("/repo"));
    }

    #[test]
    fn test_working_dir_long_flag() {
        let args = scan_args(&["lockdiff", "scan", "a", "b", "--working-dir", "/repo"]);
        assert_eq!(args.working_dir, PathBuf::from("/repo"));
    }

    #[test]
    fn test_verbose_count() {
        let args = scan_args(&["lockdiff", "scan", "a", "b", "-vv"]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_json_flag_disables_color_and_progress() {
        let args = scan_args(&["lockdiff", "scan", "a", "b", "--json"]);
        assert!(args.json);
        assert!(!args.use_color());
        assert!(!args.show_progress());
    }

    #[test]
    fn test_no_color_flag() {
        let args = scan_args(&["lockdiff", "scan", "a", "b", "--no-color"]);
        assert!(!args.use_color());
        assert!(args.show_progress());
    }

    #[test]
    fn test_quiet_disables_progress() {
        let args = scan_args(&["lockdiff", "scan", "a", "b", "-q"]);
        assert!(args.quiet);
        assert!(!args.show_progress());
    }

    #[test]
    fn test_json_conflicts_with_markdown() {
        let result = Cli::try_parse_from(["lockdiff", "scan", "a", "b", "--json", "--markdown"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_head_is_error() {
        let result = Cli::try_parse_from(["lockdiff", "scan", "main"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_report_flag() {
        let args = scan_args(&["lockdiff", "scan", "a", "b", "--no-report"]);
        assert!(args.no_report);
    }
}
