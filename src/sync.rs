// ABOUTME: Repository synchronizer: brings the checkout level with origin.
// ABOUTME: Refuses to act on missing, non-git, or dirty working trees.

use crate::error::{Error, Result};
use crate::journal::Journal;
use crate::runner::{CommandRunner, argv};
use std::path::Path;

/// Remote every fetch and pull targets.
pub const REMOTE: &str = "origin";

/// What the synchronizer found out about the checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Local and remote heads already match; nothing to redeploy.
    UpToDate,
    /// New commits were pulled; stacks should be re-applied.
    Updated { local: String, remote: String },
}

pub struct Synchronizer<'a> {
    runner: &'a dyn CommandRunner,
    base_dir: &'a Path,
    branch: &'a str,
}

impl<'a> Synchronizer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, base_dir: &'a Path, branch: &'a str) -> Self {
        Self {
            runner,
            base_dir,
            branch,
        }
    }

    /// Fetch, compare heads, and pull when the remote moved ahead.
    ///
    /// The dirty-tree check runs before the hash comparison: a checkout
    /// with uncommitted changes is refused even when there is nothing to
    /// pull.
    pub async fn sync(&self, journal: &Journal) -> Result<SyncOutcome> {
        if !self.base_dir.is_dir() {
            return Err(Error::BaseDirNotFound(self.base_dir.to_path_buf()));
        }
        if !self.base_dir.join(".git").exists() {
            return Err(Error::NotARepository(self.base_dir.to_path_buf()));
        }

        self.fetch().await?;

        let local = self.rev_parse("HEAD").await?;
        let remote_ref = format!("refs/remotes/{}/{}", REMOTE, self.branch);
        let remote = self.rev_parse(&remote_ref).await?;
        journal.state(format!(
            "local {local}, {}/{} {remote}",
            REMOTE, self.branch
        ));

        if self.working_tree_dirty().await? {
            return Err(Error::DirtyWorkingTree(self.base_dir.to_path_buf()));
        }

        if local == remote {
            return Ok(SyncOutcome::UpToDate);
        }

        self.pull().await?;
        journal.info(format!("Pulled {}/{}", REMOTE, self.branch));
        Ok(SyncOutcome::Updated { local, remote })
    }

    async fn fetch(&self) -> Result<()> {
        let output = self
            .runner
            .run(self.base_dir, "git", &argv(&["fetch", "--quiet", REMOTE]))
            .await?;
        if output.success() {
            Ok(())
        } else {
            Err(Error::FetchFailed(output.stderr.trim().to_string()))
        }
    }

    async fn rev_parse(&self, reference: &str) -> Result<String> {
        let output = self
            .runner
            .run(
                self.base_dir,
                "git",
                &argv(&["rev-parse", "--verify", reference]),
            )
            .await?;
        if !output.success() {
            return Err(Error::RevParseFailed {
                reference: reference.to_string(),
                detail: output.stderr.trim().to_string(),
            });
        }
        let hash = output.stdout.trim().to_string();
        if hash.is_empty() {
            return Err(Error::RevParseFailed {
                reference: reference.to_string(),
                detail: "resolved to an empty hash".to_string(),
            });
        }
        Ok(hash)
    }

    async fn working_tree_dirty(&self) -> Result<bool> {
        let output = self
            .runner
            .run(self.base_dir, "git", &argv(&["status", "--porcelain"]))
            .await?;
        if !output.success() {
            // status only fails when the repository metadata is unusable
            return Err(Error::NotARepository(self.base_dir.to_path_buf()));
        }
        Ok(!output.stdout.trim().is_empty())
    }

    async fn pull(&self) -> Result<()> {
        let output = self
            .runner
            .run(
                self.base_dir,
                "git",
                &argv(&["pull", "--quiet", REMOTE, self.branch]),
            )
            .await?;
        if output.success() {
            Ok(())
        } else {
            Err(Error::PullFailed {
                branch: self.branch.to_string(),
                detail: output.stderr.trim().to_string(),
            })
        }
    }
}
