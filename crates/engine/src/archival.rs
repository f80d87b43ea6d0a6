// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared terminal-materialisation logic (§4.8): render the status report,
//! merge it with the document, move the merged artefact and metadata into
//! the appropriate archive, and remove the job directory. Used both by the
//! finalize sweep (a job that actually ran) and by queue-stage cancel (a
//! job that never left the queue and needs a synthetic failure archive).
//!
//! Nothing here deletes the job directory until every prior step has
//! succeeded, so a failure at any point leaves the job exactly where a
//! retry on the next tick will find it again.

use std::path::Path;

use kfax_adapters::{FaxBackend, HeaderTool, PdfMerger, ReportRenderer};
use kfax_core::{Clock, Job};
use thiserror::Error;

use crate::deps::Deps;
use crate::document::original_document;
use crate::paths::{archive_base, failure_eingang_path, failure_pdf_path, metadata_path, success_pdf_path};

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("rendering status report failed")]
    Render(#[source] kfax_adapters::AdapterError),
    #[error("merging report with document failed")]
    Merge(#[source] kfax_adapters::AdapterError),
    #[error("store operation failed")]
    Store(#[source] kfax_store::StoreError),
    #[error("filesystem operation on {path} failed")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders, merges, and files a job's terminal artefacts. `doneq_path` is
/// `None` for a job that never submitted (queue-stage cancel);
/// `copy_original_to_eingang` is true only for the failure path, where the
/// original document gets a re-ingestible copy in the failure-eingang
/// directory.
#[allow(clippy::too_many_arguments)]
pub async fn materialize<F, R, M, H, C>(
    deps: &Deps<F, R, M, H, C>,
    job_dir: &Path,
    job: &mut Job,
    job_id: &str,
    doneq_path: Option<&Path>,
    document_variant: &Path,
    is_success: bool,
    copy_original_to_eingang: bool,
) -> Result<(), MaterializeError>
where
    F: FaxBackend,
    R: ReportRenderer,
    M: PdfMerger,
    H: HeaderTool,
    C: Clock,
{
    let job_json = job_dir.join("job.json");
    let report_tmp = job_dir.join("report.pdf");
    let merged_tmp = job_dir.join("merged.pdf");

    deps.report_renderer
        .render(&job_json, doneq_path, &report_tmp, deps.config.report_timeout)
        .await
        .map_err(MaterializeError::Render)?;
    deps.pdf_merger
        .merge(&report_tmp, document_variant, &merged_tmp, deps.config.report_timeout)
        .await
        .map_err(MaterializeError::Merge)?;

    let base = archive_base(job.source.filename_original.as_deref(), job_id);

    if copy_original_to_eingang {
        let eingang_dir = deps.config.failure_in_dir();
        kfax_store::ensure_dir(&eingang_dir).map_err(MaterializeError::Store)?;
        let orig = original_document(job_dir);
        let dest = failure_eingang_path(&eingang_dir, &base, job_id);
        std::fs::copy(&orig, &dest).map_err(|source| MaterializeError::Io { path: dest.clone(), source })?;
    }

    let archive_dir = if is_success { deps.config.archive_ok_dir() } else { deps.config.failure_out_dir() };
    kfax_store::ensure_dir(&archive_dir).map_err(MaterializeError::Store)?;

    let pdf_path = if is_success {
        success_pdf_path(&archive_dir, &base, job_id)
    } else {
        failure_pdf_path(&archive_dir, &base, job_id)
    };
    std::fs::rename(&merged_tmp, &pdf_path).map_err(|source| MaterializeError::Io { path: pdf_path.clone(), source })?;

    let json_path = metadata_path(&archive_dir, &base, job_id);
    kfax_store::write_json_atomic(&json_path, job).map_err(MaterializeError::Store)?;

    std::fs::remove_dir_all(job_dir)
        .map_err(|source| MaterializeError::Io { path: job_dir.to_path_buf(), source })?;

    Ok(())
}

#[cfg(test)]
#[path = "archival_tests.rs"]
mod tests;
