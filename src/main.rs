//! lockdiff - Lock file diff scanner CLI tool
//!
//! Lists dependency changes in lock files between two git revisions:
//! - Rust (Cargo.lock)
//! - PHP (composer.lock)
//! - Node.js (package-lock.json)
//! - Python (poetry.lock, uv.lock)

use clap::Parser;
use lockdiff::cli::{Cli, Command, ScanArgs};
use lockdiff::logging;
use lockdiff::output::{create_formatter, OutputConfig};
use lockdiff::report::{GitHubReporter, HttpClient, ReportRunner};
use lockdiff::scanner::Scanner;
use lockdiff::vcs::GitRepository;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(args) => {
            logging::init(args.verbose, logging::json_from_env());

            // Run the main logic and handle errors
            match scan(args).await {
                Ok(exit_code) => exit_code,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// `lockdiff scan`
async fn scan(args: ScanArgs) -> anyhow::Result<ExitCode> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base = %args.base,
        head = %args.head,
        working_dir = %args.working_dir.display(),
        "starting scan"
    );

    let repository = GitRepository::open(&args.working_dir)?;

    // Reporter configuration errors abort before any work is done
    let runner = if args.no_report {
        ReportRunner::default()
    } else {
        let github = GitHubReporter::from_env(HttpClient::new()?)?;
        ReportRunner::default().register(Box::new(github))
    };

    let show_progress = args.show_progress() && io::stderr().is_terminal();
    let scanner = Scanner::new(repository).with_progress(show_progress);
    let result = scanner.scan(&args.base, &args.head)?;

    // Create output formatter based on CLI options
    let color = args.use_color() && io::stdout().is_terminal();
    if !color {
        colored::control::set_override(false);
    }
    let output_config =
        OutputConfig::from_cli(args.json, args.markdown, args.verbose > 0, args.quiet, color);
    let formatter = create_formatter(output_config);

    {
        let mut stdout = io::stdout().lock();
        formatter.format(&result, &mut stdout)?;
        stdout.flush()?;
    }

    if !result.errors.is_empty() {
        warn!(
            failed = result.errors.len(),
            "some lock files could not be scanned"
        );
    }

    let failures = runner.run(&result.diffs).await;
    if !failures.is_empty() {
        warn!(failed = failures.len(), "some reporters failed");
    }

    Ok(ExitCode::SUCCESS)
}
