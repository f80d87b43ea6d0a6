// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory listing, atomic stage transitions (rename), and directory
//! creation for the root queue tree.

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Lists job directories directly under `root`, ascending lexicographically
/// by directory name. Deterministic regardless of filesystem iteration
/// order, and tolerant of concurrent mutation: entries that vanish or
/// become unreadable mid-scan are silently skipped rather than failing the
/// whole listing.
pub fn list_job_dirs(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect();

    dirs.sort();
    dirs
}

/// Moves a job directory between root queues. The only stage transition in
/// the system; relies exclusively on POSIX `rename` (same filesystem) for
/// atomicity — no multi-step "commit" that could leave a job visible in two
/// queues at once.
pub fn move_dir(src: &Path, dst: &Path) -> Result<(), StoreError> {
    std::fs::rename(src, dst).map_err(|source| StoreError::Io {
        path: src.to_path_buf(),
        source,
    })
}

/// Creates a directory (and its parents) if it doesn't already exist.
pub fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    std::fs::create_dir_all(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
