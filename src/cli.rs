// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: One flat flag set; the tool performs a single pass per invocation.

use clap::Parser;
use dscd::config::{DEFAULT_BRANCH, DEFAULT_LOG_FILE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dscd")]
#[command(about = "Polling GitOps redeployer for Docker Compose stacks")]
#[command(version)]
pub struct Cli {
    /// Remote branch to track
    #[arg(short = 'b', long = "branch", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Repository checkout containing the stack definitions
    #[arg(short = 'd', long = "base-dir")]
    pub base_dir: PathBuf,

    /// Redeploy a stack only when a dry run reports a change
    #[arg(short = 'g', long = "graceful")]
    pub graceful: bool,

    /// Journal file, appended to on every run
    #[arg(short = 'l', long = "log-file", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Extra options passed to every docker compose invocation
    #[arg(short = 'o', long = "compose-opts", default_value = "", allow_hyphen_values = true)]
    pub compose_opts: String,

    /// Prune unused images after the run
    #[arg(short = 'p', long = "prune")]
    pub prune: bool,

    /// Skip stacks whose directory path contains this substring
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Option<String>,

    /// Debug-level diagnostics on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
