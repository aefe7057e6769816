// ABOUTME: End-of-run housekeeping: image prune and artifact removal.
// ABOUTME: The dry-run artifact is removed even when pruning fails.

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::journal::Journal;
use crate::runner::{CommandRunner, argv};
use std::fs;
use std::io;

/// Prune images if requested, drop the dry-run artifact, and close the
/// run with the terminal "Done" journal line.
pub async fn run(
    runner: &dyn CommandRunner,
    config: &RunConfig,
    journal: &Journal,
) -> Result<()> {
    let pruned = if config.prune {
        prune_images(runner, config, journal).await
    } else {
        Ok(())
    };

    if config.graceful {
        remove_artifact(config);
    }

    pruned?;
    journal.info("Done");
    Ok(())
}

/// `docker image prune --all --force`
async fn prune_images(
    runner: &dyn CommandRunner,
    config: &RunConfig,
    journal: &Journal,
) -> Result<()> {
    let output = runner
        .run(
            &config.base_dir,
            "docker",
            &argv(&["image", "prune", "--all", "--force"]),
        )
        .await?;
    if !output.success() {
        return Err(Error::PruneFailed(output.stderr.trim().to_string()));
    }
    journal.info("Pruned unused images");
    Ok(())
}

fn remove_artifact(config: &RunConfig) {
    match fs::remove_file(&config.dry_run_artifact) {
        Ok(()) => tracing::debug!("removed {}", config.dry_run_artifact.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            "could not remove {}: {e}",
            config.dry_run_artifact.display()
        ),
    }
}
