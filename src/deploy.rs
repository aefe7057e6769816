// ABOUTME: Applies compose stack files through the docker CLI.
// ABOUTME: Graceful mode gates each redeploy behind a dry run.

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::journal::Journal;
use crate::runner::CommandRunner;
use std::fs;
use std::path::{Path, PathBuf};

/// Substring of `docker compose up --dry-run` output marking a service
/// container due for recreation. Textual contract with compose; revisit
/// whenever compose changes its dry-run wording.
pub const RECREATE_MARKER: &str = "Recreate";

/// Whether a dry-run report says any resource would be recreated.
pub fn recreates_any(report: &str) -> bool {
    report.contains(RECREATE_MARKER)
}

pub struct Redeployer<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a RunConfig,
}

impl<'a> Redeployer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a RunConfig) -> Self {
        Self { runner, config }
    }

    /// Re-apply every stack in order, stopping at the first failure.
    pub async fn redeploy_all(&self, stacks: &[PathBuf], journal: &Journal) -> Result<()> {
        for stack in stacks {
            self.redeploy(stack, journal).await?;
        }
        Ok(())
    }

    async fn redeploy(&self, stack: &Path, journal: &Journal) -> Result<()> {
        if self.config.graceful {
            let report = self.dry_run(stack).await?;
            if !recreates_any(&report) {
                journal.graceful(format!("skipping {}, no change", stack.display()));
                return Ok(());
            }
            journal.graceful(format!("redeploying {}", stack.display()));
        }
        self.apply(stack).await?;
        journal.info(format!("Redeployed {}", stack.display()));
        Ok(())
    }

    /// `docker compose <opts> -f <stack> up -d --quiet-pull`
    async fn apply(&self, stack: &Path) -> Result<()> {
        let args = self.compose_args(stack, &["up", "-d", "--quiet-pull"]);
        let output = self
            .runner
            .run(&self.config.base_dir, "docker", &args)
            .await?;
        if output.success() {
            Ok(())
        } else {
            Err(Error::DeployFailed {
                file: stack.to_path_buf(),
                detail: output.stderr.trim().to_string(),
            })
        }
    }

    /// `docker compose <opts> -f <stack> up -d --dry-run`, with the report
    /// saved to the transient artifact for operator inspection.
    async fn dry_run(&self, stack: &Path) -> Result<String> {
        let args = self.compose_args(stack, &["up", "-d", "--dry-run"]);
        let output = self
            .runner
            .run(&self.config.base_dir, "docker", &args)
            .await?;
        if !output.success() {
            return Err(Error::DeployFailed {
                file: stack.to_path_buf(),
                detail: output.stderr.trim().to_string(),
            });
        }

        // compose prints the dry-run plan on stderr, so scan both streams
        let report = output.combined();
        fs::write(&self.config.dry_run_artifact, &report).map_err(|source| Error::Artifact {
            path: self.config.dry_run_artifact.clone(),
            source,
        })?;
        Ok(report)
    }

    /// Pass-through options sit between `compose` and the per-file
    /// arguments, for dry and real invocations alike.
    fn compose_args(&self, stack: &Path, tail: &[&str]) -> Vec<String> {
        let mut args = Vec::with_capacity(self.config.compose_opts.len() + tail.len() + 3);
        args.push("compose".to_string());
        args.extend(self.config.compose_opts.iter().cloned());
        args.push("-f".to_string());
        args.push(stack.display().to_string());
        args.extend(tail.iter().map(|s| s.to_string()));
        args
    }
}
