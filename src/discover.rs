// ABOUTME: Finds compose stack files under the repository tree.
// ABOUTME: Deterministic sorted order with substring-based directory exclusion.

use crate::error::{Error, Result};
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Canonical compose filenames, both spellings and both extensions.
pub const STACK_FILENAMES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// Whether `name` is one of the canonical compose filenames.
pub fn is_stack_filename(name: &str) -> bool {
    STACK_FILENAMES.contains(&name)
}

/// Whether a stack in `dir` is excluded by the configured pattern. Plain
/// substring containment, not a glob or regex.
pub fn is_excluded(dir: &Path, exclude: Option<&str>) -> bool {
    match exclude {
        Some(pattern) if !pattern.is_empty() => dir.to_string_lossy().contains(pattern),
        _ => false,
    }
}

/// Walk `base_dir` for stack files, sorted by path. Exclusion matches the
/// containing directory, never the filename. Nothing is cached between
/// runs; every call walks from scratch.
pub fn discover_stacks(base_dir: &Path, exclude: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut stacks = Vec::new();
    let walker = WalkBuilder::new(base_dir)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| entry.file_name() != OsStr::new(".git"))
        .build();

    for entry in walker {
        let entry = entry.map_err(|source| Error::Walk {
            path: base_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_stack_filename(name) {
            continue;
        }
        let path = entry.into_path();
        let parent = path.parent().unwrap_or(base_dir);
        if is_excluded(parent, exclude) {
            tracing::debug!("excluding {}", path.display());
            continue;
        }
        stacks.push(path);
    }

    stacks.sort();
    Ok(stacks)
}
