// ABOUTME: Subprocess execution seam for git and docker invocations.
// ABOUTME: Commands are argument lists run without a shell.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Captured result of one external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout and stderr concatenated, for callers that scan tool output.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

/// Errors from launching an external command. A command that launched but
/// exited non-zero is not an error at this layer.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Runs external commands. Implemented by the real process runner and by
/// scripted fakes in tests.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd`, waiting for completion and
    /// capturing both output streams.
    async fn run(
        &self,
        cwd: &Path,
        program: &str,
        args: &[String],
    ) -> Result<CommandOutput, RunnerError>;
}

/// Convenience for building owned argument vectors from literals.
pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// `CommandRunner` backed by real subprocesses.
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        cwd: &Path,
        program: &str,
        args: &[String],
    ) -> Result<CommandOutput, RunnerError> {
        tracing::debug!("running {} {:?} in {}", program, args, cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| RunnerError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
