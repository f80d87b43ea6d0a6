// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic `job.json` read/write.
//!
//! Write: serialize to a sibling `.tmp` file, then `rename` over the
//! target, so a reader never observes a torn write. Read: tolerate a
//! missing file (`StoreError::NotFound`) and malformed JSON
//! (`StoreError::MalformedJson`) as distinct, non-fatal outcomes — the
//! caller decides whether either is "skip this job" or "not ready yet".

use std::io::Write;
use std::path::Path;

use kfax_core::Job;

use crate::error::StoreError;

/// Reads and parses `job.json` from a job directory.
pub fn read_job(job_dir: &Path) -> Result<Job, StoreError> {
    let path = job_dir.join("job.json");
    if !path.exists() {
        return Err(StoreError::NotFound(path));
    }
    let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::MalformedJson { path, source })
}

/// Atomically writes `job.json` in a job directory.
///
/// Matches the source's `write_json`: pretty-printed with a trailing
/// newline, written to `job.json.tmp` then renamed over `job.json`.
pub fn write_job(job_dir: &Path, job: &Job) -> Result<(), StoreError> {
    write_json_atomic(&job_dir.join("job.json"), job)
}

/// Atomically writes a [`Job`] to an arbitrary path, not necessarily named
/// `job.json` — used by the archival materialiser, which writes
/// `<base>__<jobid>.json` alongside the merged PDF rather than into a job
/// directory. Same write-temp-then-rename discipline as [`write_job`].
pub fn write_json_atomic(path: &Path, job: &Job) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("json.tmp");

    let mut body = serde_json::to_vec_pretty(job).map_err(|source| StoreError::MalformedJson {
        path: path.to_path_buf(),
        source,
    })?;
    body.push(b'\n');

    let mut tmp = std::fs::File::create(&tmp_path).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    tmp.write_all(&body).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    tmp.sync_all().map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    drop(tmp);

    std::fs::rename(&tmp_path, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
