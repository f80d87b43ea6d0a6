// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors the engine surfaces to its caller (the daemon crate). Per-job
//! failures inside a sweep are deliberately *not* represented here: §7
//! requires the scheduler to log and continue rather than abort a tick, so
//! sweeps report counts, not `Result`. This enum is reserved for failures
//! that make a tick meaningless to continue (a completely unreadable queue
//! root, for instance).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store operation failed at {path}")]
    Store {
        path: PathBuf,
        #[source]
        source: kfax_store::StoreError,
    },
}

impl From<kfax_store::StoreError> for EngineError {
    fn from(source: kfax_store::StoreError) -> Self {
        let path = match &source {
            kfax_store::StoreError::Io { path, .. }
            | kfax_store::StoreError::MalformedJson { path, .. }
            | kfax_store::StoreError::LockFailed { path, .. } => path.clone(),
            kfax_store::StoreError::NotFound(path) => path.clone(),
        };
        EngineError::Store { path, source }
    }
}
