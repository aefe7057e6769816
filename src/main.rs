// ABOUTME: Entry point for the dscd CLI.
// ABOUTME: Wires the journal, command runner, and deployment pipeline together.

mod cli;

use clap::Parser;
use cli::Cli;
use dscd::cleanup;
use dscd::config::RunConfig;
use dscd::deploy::Redeployer;
use dscd::discover;
use dscd::error::Result;
use dscd::journal::Journal;
use dscd::runner::{CommandRunner, ProcessRunner};
use dscd::sync::{REMOTE, SyncOutcome, Synchronizer};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig {
        base_dir: cli.base_dir,
        branch: cli.branch,
        log_file: cli.log_file,
        compose_opts: RunConfig::tokenize_opts(&cli.compose_opts),
        exclude: cli.exclude,
        graceful: cli.graceful,
        prune: cli.prune,
        dry_run_artifact: RunConfig::default_artifact_path(),
    };

    let journal = match Journal::open(&config.log_file) {
        Ok(journal) => journal,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    match run(&config, &ProcessRunner, &journal).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            journal.error(e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

/// One full poll-and-redeploy pass.
async fn run(config: &RunConfig, runner: &dyn CommandRunner, journal: &Journal) -> Result<()> {
    journal.info(format!(
        "Checking {} against {}/{}",
        config.base_dir.display(),
        REMOTE,
        config.branch
    ));

    let synchronizer = Synchronizer::new(runner, &config.base_dir, &config.branch);
    match synchronizer.sync(journal).await? {
        SyncOutcome::UpToDate => {
            journal.info("Hashes match, so nothing to do");
        }
        SyncOutcome::Updated { .. } => {
            let stacks = discover::discover_stacks(&config.base_dir, config.exclude.as_deref())?;
            journal.info(format!("Found {} stack file(s)", stacks.len()));
            Redeployer::new(runner, config)
                .redeploy_all(&stacks, journal)
                .await?;
        }
    }

    cleanup::run(runner, config, journal).await
}
