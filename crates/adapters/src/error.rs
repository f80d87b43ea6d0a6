// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from external command adapters.
///
/// A timeout is modeled as a distinct, non-panicking outcome (§5
/// "Timeouts"): callers decide per collaborator whether it's fatal
/// (submit) or merely logged and tolerated (cancel, status refresh).
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{description} timed out after {timeout_secs}s")]
    Timeout {
        description: String,
        timeout_secs: u64,
    },

    #[error("{description} failed to start: {source}")]
    Spawn {
        description: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{description}: {source}")]
    Io {
        description: String,
        #[source]
        source: std::io::Error,
    },
}
