// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-instance advisory lock (§4.2).
//!
//! Reboot-safe: the lock is a kernel `flock`, held for the lifetime of the
//! file descriptor, not a "lockfile exists" convention. A stale PID left in
//! the file after a crash is harmless — the kernel releases the lock when
//! the holding process exits, so the next daemon simply acquires it. The
//! PID is written for operator visibility only; nothing in this crate or
//! the engine ever reads it back to make a decision.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::error::StoreError;

/// An acquired exclusive lock. Released when dropped (the kernel releases
/// the `flock` when the underlying file descriptor closes).
pub struct InstanceLock {
    // NOTE(lifetime): held only to keep the fd — and thus the flock — alive.
    #[allow(dead_code)]
    file: File,
}

impl InstanceLock {
    /// Attempts to acquire the exclusive lock at `path` without blocking.
    /// Returns `StoreError::LockFailed` if another instance already holds
    /// it, per §6: "on lock contention, exit with non-zero".
    pub fn acquire(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Don't truncate before locking: if another instance holds the
        // lock, truncating first would wipe its PID for no reason.
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        file.try_lock_exclusive().map_err(|source| StoreError::LockFailed {
            path: path.to_path_buf(),
            source,
        })?;

        write_pid(&file, path)?;

        Ok(Self { file })
    }
}

fn write_pid(mut file: &File, path: &Path) -> Result<(), StoreError> {
    file.set_len(0).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(file, "{}", std::process::id()).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    file.sync_all().map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
