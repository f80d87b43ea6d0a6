// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the filesystem store.
///
/// Per §7 of the specification, almost all of these are caught by the
/// caller, logged, and turned into "skip this job this tick" rather than
/// propagated to the scheduler loop.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed job.json at {path}: {source}")]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("job.json not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to acquire instance lock at {path}: already running?")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
