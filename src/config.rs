// ABOUTME: Run configuration resolved once from the command line.
// ABOUTME: Carries the tokenized compose options and the per-run artifact path.

use std::env;
use std::path::PathBuf;
use std::process;

/// Journal location when `-l` is not given.
pub const DEFAULT_LOG_FILE: &str = "/tmp/dscd.log";

/// Remote branch tracked when `-b` is not given.
pub const DEFAULT_BRANCH: &str = "main";

/// Everything one run needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Repository checkout holding the stack definitions.
    pub base_dir: PathBuf,
    /// Remote branch the checkout tracks.
    pub branch: String,
    /// Deployment journal path.
    pub log_file: PathBuf,
    /// Tokenized pass-through options for every compose invocation.
    pub compose_opts: Vec<String>,
    /// Stacks whose directory path contains this substring are skipped.
    pub exclude: Option<String>,
    /// Gate each redeploy behind a dry run.
    pub graceful: bool,
    /// Force-prune unused images after the run.
    pub prune: bool,
    /// Scratch file holding the most recent dry-run report.
    pub dry_run_artifact: PathBuf,
}

impl RunConfig {
    /// Split the opaque `-o` string into arguments. The string is never
    /// handed to a shell; whitespace is the only separator honored.
    pub fn tokenize_opts(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(str::to_owned).collect()
    }

    /// Scratch path for dry-run reports, unique per process.
    pub fn default_artifact_path() -> PathBuf {
        env::temp_dir().join(format!("dscd-dryrun-{}.out", process::id()))
    }
}
