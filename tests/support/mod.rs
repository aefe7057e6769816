// ABOUTME: Test support utilities for dscd integration tests.
// ABOUTME: Builds throwaway git repositories and a recording docker stub.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git with a fixture-friendly identity, asserting success.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .arg("-c")
        .arg("init.defaultBranch=main")
        .arg("-c")
        .arg("user.name=dscd-tests")
        .arg("-c")
        .arg("user.email=dscd-tests@example.invalid")
        .arg("-c")
        .arg("commit.gpgsign=false")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A bare origin, the checkout the daemon watches, and a second clone used
/// to advance the remote.
#[allow(dead_code)]
pub struct RepoFixture {
    pub root: TempDir,
    pub origin: PathBuf,
    pub checkout: PathBuf,
    pub workshop: PathBuf,
}

#[allow(dead_code)]
impl RepoFixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let origin = root.path().join("origin.git");
        fs::create_dir(&origin).unwrap();
        git(&origin, &["init", "--bare"]);

        let workshop = root.path().join("workshop");
        git(root.path(), &["clone", origin.to_str().unwrap(), "workshop"]);
        fs::write(workshop.join("README.md"), "stack definitions\n").unwrap();
        git(&workshop, &["add", "."]);
        git(&workshop, &["commit", "-m", "initial"]);
        git(&workshop, &["push", "origin", "main"]);

        let checkout = root.path().join("checkout");
        git(root.path(), &["clone", origin.to_str().unwrap(), "checkout"]);

        Self {
            root,
            origin,
            checkout,
            workshop,
        }
    }

    /// Commit `contents` at `relative` in the workshop clone and push,
    /// leaving the checkout one commit behind.
    pub fn push_file(&self, relative: &str, contents: &str) {
        let path = self.workshop.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        git(&self.workshop, &["add", "."]);
        git(&self.workshop, &["commit", "-m", relative]);
        git(&self.workshop, &["push", "origin", "main"]);
    }

    pub fn head_of(&self, clone: &Path) -> String {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(clone)
            .output()
            .expect("failed to run git rev-parse");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

/// Install a fake `docker` that records its argv and fakes dry-run
/// reports: stacks under a directory containing "changed" get the
/// recreate marker, everything else reads as running. Returns the stub's
/// bin directory and the invocation log path.
#[allow(dead_code)]
pub fn stub_docker(root: &Path) -> (PathBuf, PathBuf) {
    let bin = root.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let log = root.join("docker-invocations.log");
    let script = format!(
        r#"#!/bin/sh
echo "$@" >> "{log}"
case "$*" in
*--dry-run*)
    case "$*" in
    *changed*) echo " DRY-RUN MODE -  Container web-1  Recreate" ;;
    *) echo " DRY-RUN MODE -  Container web-1  Running" ;;
    esac
    ;;
esac
exit 0
"#,
        log = log.display()
    );
    let docker = bin.join("docker");
    fs::write(&docker, script).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&docker, fs::Permissions::from_mode(0o755)).unwrap();
    }
    (bin, log)
}

/// Recorded stub invocations, one argv line each, oldest first.
#[allow(dead_code)]
pub fn docker_calls(log: &Path) -> Vec<String> {
    if !log.exists() {
        return Vec::new();
    }
    fs::read_to_string(log)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// PATH with `bin` prepended, for handing to a child command.
#[allow(dead_code)]
pub fn path_with(bin: &Path) -> OsString {
    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut paths: Vec<PathBuf> = vec![bin.to_path_buf()];
    paths.extend(std::env::split_paths(&current));
    std::env::join_paths(paths).unwrap()
}
