// ABOUTME: Application-wide error types for dscd.
// ABOUTME: Maps each fatal condition to its process exit code.

use crate::runner::RunnerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("base directory not found: {0}")]
    BaseDirNotFound(PathBuf),

    #[error("{0} is not a git repository")]
    NotARepository(PathBuf),

    #[error("Uncommitted changes detected in {0}")]
    DirtyWorkingTree(PathBuf),

    #[error("failed to fetch from origin (remote offline or unreachable?): {0}")]
    FetchFailed(String),

    #[error("could not resolve {reference}: {detail}")]
    RevParseFailed { reference: String, detail: String },

    #[error("failed to pull origin/{branch}: {detail}")]
    PullFailed { branch: String, detail: String },

    #[error("failed to walk {}: {source}", path.display())]
    Walk { path: PathBuf, source: ignore::Error },

    #[error("deploy failed for {}: {detail}", file.display())]
    DeployFailed { file: PathBuf, detail: String },

    #[error("image prune failed: {0}")]
    PruneFailed(String),

    #[error("failed to open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: std::io::Error },

    #[error("failed to write dry-run report to {}: {source}", path.display())]
    Artifact { path: PathBuf, source: std::io::Error },

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

impl Error {
    /// Exit code reported to the invoking process. A missing base directory
    /// is the one condition with its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::BaseDirNotFound(_) => 127,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
