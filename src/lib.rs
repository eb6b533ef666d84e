//! checkpost: publish static-analysis findings onto a commit as inline
//! check-run annotations, reduced to a single pass/fail verdict.
//!
//! One invocation reads a CodeChecker-style JSON report, maps every finding
//! to a check-run annotation, and drives one remote check run through its
//! lifecycle: one creation call, then one update call per batch of at most
//! 50 annotations, the last update carrying the aggregated conclusion.
//!
//! # Pipeline
//!
//! [`report`] → [`annotation`] → [`verdict`] (computed once, used at the
//! end) → [`batch`] → [`checkrun`], orchestrated by [`publish`].
//!
//! # Failure semantics
//!
//! Strictly sequential, no retries, no partial-success recovery: every
//! error is fatal and exits non-zero. A mid-batch API failure may leave the
//! remote check run `in_progress`; that is an accepted limitation.

pub mod annotation;
pub mod batch;
pub mod checkrun;
pub mod config;
pub mod error;
pub mod publish;
pub mod report;
pub mod verdict;

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "checkpost",
    version = env!("CARGO_PKG_VERSION"),
    about = "Publish static-analysis findings as check-run annotations on a commit"
)]
struct Cli {
    /// Path to the analysis report (CodeChecker JSON).
    report: PathBuf,
    /// Workspace root stripped from absolute finding paths (overrides GITHUB_WORKSPACE).
    #[clap(long)]
    workspace_root: Option<String>,
    /// Check-run API base URL (overrides GITHUB_API_URL).
    #[clap(long)]
    api_url: Option<String>,
    /// Check-run name shown on the commit.
    #[clap(long)]
    name: Option<String>,
}

pub fn run() -> Result<(), error::CheckpostError> {
    let cli = Cli::parse();

    // Configuration is resolved fully before any file or network I/O.
    let mut config = config::PublishConfig::from_env()?;
    if let Some(root) = cli.workspace_root {
        config.workspace_root = Some(root);
    }
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(name) = cli.name {
        config.check_name = name;
    }

    let findings = report::load_report(&cli.report)?;
    let mut api = checkrun::GithubChecks::new(&config)?;

    match publish::publish(&config, &findings, &mut api)? {
        publish::PublishOutcome::NoFindings => {
            println!(
                "{} No findings in report; nothing to publish.",
                "✓".bright_green()
            );
        }
        publish::PublishOutcome::Published {
            check_run_id,
            verdict,
            annotations,
            batches,
        } => {
            let conclusion = match verdict {
                verdict::Verdict::Success => "success".bright_green(),
                verdict::Verdict::Failure => "failure".bright_red(),
            };
            println!(
                "{} Posted {} annotation(s) in {} batch(es) to check run {} (conclusion: {})",
                "✓".bright_green(),
                annotations,
                batches,
                check_run_id,
                conclusion
            );
        }
    }
    Ok(())
}
