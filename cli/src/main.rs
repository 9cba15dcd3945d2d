//! CLI for the forge migrator.
//!
//! Moves a Pagure project's issues and pull requests to GitHub in stages,
//! keeping every issue number identical on both sides.

use clap::{Args as ClapArgs, Parser, Subcommand};
use forge_migrator::{RunMode, RunSummary, Runner, RunnerConfig, RunnerError, TransferInput};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Forge Migrator - Move Pagure issues to GitHub without renumbering them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file.
    #[arg(long, global = true, default_value = "migration.toml")]
    config: PathBuf,

    /// GitHub Personal Access Token.
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Pagure API token (needs the issue-modification ACL for close-out).
    #[arg(long, global = true, env = "PAGURE_TOKEN", hide_env_values = true)]
    pagure_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Snapshot all source issues and pull requests to JSON.
    Export {
        /// Directory that receives issues.json and requests.json.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Create one destination issue per source id after the start offset.
    Transfer {
        #[command(flatten)]
        inputs: ExportInputs,

        /// Path to the exported pull requests.
        #[arg(long, default_value = "requests.json")]
        requests: PathBuf,

        /// Last id already present on the destination.
        #[arg(long)]
        start_offset: Option<u64>,

        /// Read records from the live source instead of the export files.
        #[arg(long)]
        from_source: bool,

        /// Print the id plan without creating anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Copy source labels onto destination issues that have none.
    Labels {
        #[command(flatten)]
        inputs: ExportInputs,
    },

    /// Append descriptions and comments to destination issue bodies.
    Merge {
        #[command(flatten)]
        inputs: ExportInputs,

        /// Lowest id whose content is merged.
        #[arg(long)]
        first_migrated_issue: Option<u64>,
    },

    /// Comment on every open source issue and close it as MIGRATED.
    CloseOut,
}

#[derive(ClapArgs, Debug)]
struct ExportInputs {
    /// Path to the exported issues.
    #[arg(long, default_value = "issues.json")]
    issues: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // reqwest and octocrab share rustls; pick the provider once.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut config = RunnerConfig::new(args.config)
        .with_github_token(args.github_token)
        .with_pagure_token(args.pagure_token);

    let mode = match args.command {
        Command::Export { output_dir } => RunMode::Export { output_dir },
        Command::Transfer {
            inputs,
            requests,
            start_offset,
            from_source,
            dry_run,
        } => {
            config = config.with_start_offset(start_offset);
            let input = if from_source {
                TransferInput::Live
            } else {
                TransferInput::Export {
                    issues: inputs.issues,
                    requests,
                }
            };
            RunMode::Transfer { input, dry_run }
        }
        Command::Labels { inputs } => RunMode::Labels {
            issues: inputs.issues,
        },
        Command::Merge {
            inputs,
            first_migrated_issue,
        } => {
            config = config.with_first_migrated_issue(first_migrated_issue);
            RunMode::Merge {
                issues: inputs.issues,
            }
        }
        Command::CloseOut => RunMode::CloseOut,
    };

    let runner = Runner::new(config)?;
    runner.run(&mode).await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );

    if summary.dry_run {
        println!("  Ids planned: {}", summary.planned);
        return;
    }

    if summary.exported_issues + summary.exported_requests > 0 {
        println!("  Issues exported: {}", summary.exported_issues);
        println!("  Pull requests exported: {}", summary.exported_requests);
    }
    println!("  Issues created: {}", summary.created);
    println!("  Placeholders created: {}", summary.placeholders);
    println!("  Closed on destination: {}", summary.closed_on_destination);
    println!("  Issues labeled: {}", summary.labeled);
    println!("  Labeling skipped: {}", summary.labels_skipped);
    println!("  Bodies merged: {}", summary.merged);
    println!("  Merges skipped: {}", summary.merges_skipped);
    println!("  Closed on source: {}", summary.closed_on_source);
    println!("  Close-outs skipped: {}", summary.close_outs_skipped);
}
