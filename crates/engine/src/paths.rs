// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive filename derivation and collision-safe placement (§4.8, §6).
//!
//! Every archived artefact is named from the job's original source
//! filename, sanitised, plus a disambiguating job id. The one exception is
//! the re-ingestible failed-original copy dropped in the failure-eingang
//! directory, which keeps a bare `<base>.pdf` name when that doesn't
//! collide, so a human (or another producer) can resubmit it unmodified.

use std::path::{Path, PathBuf};

use kfax_core::sanitize_basename;

/// Derives the archive basename for a job: its sanitised source filename,
/// defaulting to `fax` if the source carries no usable name (§6). The
/// `__<jobid>__` segment every archive filename carries already
/// disambiguates two no-filename jobs from each other.
pub fn archive_base(source_filename: Option<&str>, _job_id: &str) -> String {
    sanitize_basename(source_filename.unwrap_or(""))
}

/// Path for the merged success artefact: `<base>__<jobid>__OK.pdf`.
pub fn success_pdf_path(archive_dir: &Path, base: &str, job_id: &str) -> PathBuf {
    archive_dir.join(format!("{base}__{job_id}__OK.pdf"))
}

/// Path for the merged failure artefact: `<base>__<jobid>__FAILED.pdf`.
pub fn failure_pdf_path(archive_dir: &Path, base: &str, job_id: &str) -> PathBuf {
    archive_dir.join(format!("{base}__{job_id}__FAILED.pdf"))
}

/// Path for the archived job metadata: `<base>__<jobid>.json`, sitting
/// alongside the merged PDF it describes.
pub fn metadata_path(archive_dir: &Path, base: &str, job_id: &str) -> PathBuf {
    archive_dir.join(format!("{base}__{job_id}.json"))
}

/// Placement for the re-ingestible copy of the original document in the
/// failure-eingang directory: `<base>.pdf` if free, else
/// `<base>__<jobid>.pdf` to avoid clobbering an unrelated job that already
/// used the bare name.
pub fn failure_eingang_path(eingang_dir: &Path, base: &str, job_id: &str) -> PathBuf {
    let bare = eingang_dir.join(format!("{base}.pdf"));
    if bare.exists() {
        eingang_dir.join(format!("{base}__{job_id}.pdf"))
    } else {
        bare
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
