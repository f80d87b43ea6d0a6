// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The submission sweep (§4.6 step 5): claims queue/ jobs into
//! processing/ up to the concurrency cap, skipping recipients already
//! busy, and attempts to submit each one. Also hosts claim-race cancel
//! (§4.5's third entry point): a job whose cancel was requested in the
//! instant between being listed and being claimed is renamed straight
//! back to queue/, without consuming a processing slot, and is left for
//! queue-stage cancel to pick up on the next tick.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use kfax_adapters::{FaxBackend, HeaderTool, PdfMerger, ReportRenderer};
use kfax_core::{job::set_if_absent, Clock, Job, Status};
use tracing::{info, warn};

use crate::deps::Deps;
use crate::document::variant_to_send;

/// Number of jobs currently occupying a processing slot (`submitted` or
/// `running`), and the set of recipient numbers currently busy (`claimed`,
/// `submitted`, or `running`).
fn processing_census(processing_dir: &Path) -> (usize, HashSet<String>) {
    let mut inflight = 0;
    let mut busy = HashSet::new();

    for job_dir in kfax_store::list_job_dirs(processing_dir) {
        let Ok(job) = kfax_store::read_job(&job_dir) else {
            continue;
        };
        if job.status.map(Status::counts_as_inflight).unwrap_or(false) {
            inflight += 1;
        }
        if job.status.map(Status::is_busy).unwrap_or(false) {
            busy.insert(job.normalized_number());
        }
    }

    (inflight, busy)
}

/// First queue/ job (in deterministic directory order) whose recipient
/// isn't busy and hasn't already been attempted this sweep.
fn next_eligible(queue_dir: &Path, busy: &HashSet<String>, already_attempted: &HashSet<String>) -> Option<PathBuf> {
    for job_dir in kfax_store::list_job_dirs(queue_dir) {
        let Some(name) = job_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if already_attempted.contains(name) {
            continue;
        }
        let Ok(job) = kfax_store::read_job(&job_dir) else {
            continue;
        };
        if !busy.contains(&job.normalized_number()) {
            return Some(job_dir);
        }
    }
    None
}

pub async fn submit_sweep<F, R, M, H, C>(deps: &Deps<F, R, M, H, C>) -> usize
where
    F: FaxBackend,
    R: ReportRenderer,
    M: PdfMerger,
    H: HeaderTool,
    C: Clock,
{
    let processing_dir = deps.config.processing_dir();
    let queue_dir = deps.config.queue_dir();
    let mut already_attempted = HashSet::new();
    let mut submitted_count = 0;

    loop {
        let (inflight, busy) = processing_census(&processing_dir);
        if inflight >= deps.config.max_inflight_processing {
            break;
        }

        let Some(candidate) = next_eligible(&queue_dir, &busy, &already_attempted) else {
            break;
        };
        let Some(dir_name) = candidate.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            break;
        };
        already_attempted.insert(dir_name.clone());

        let dest = processing_dir.join(&dir_name);
        if let Err(err) = kfax_store::move_dir(&candidate, &dest) {
            warn!(job = %dir_name, error = %err, "submit: failed to claim job directory");
            continue;
        }

        let mut job = match kfax_store::read_job(&dest) {
            Ok(job) => job,
            Err(err) => {
                warn!(job = %dir_name, error = %err, "submit: claimed job directory but failed to read job.json");
                continue;
            }
        };

        if job.cancel_requested() {
            if let Err(err) = kfax_store::move_dir(&dest, &candidate) {
                warn!(job = %dir_name, error = %err, "submit: claim-race cancel failed to return job to queue");
            } else {
                info!(job = %dir_name, "submit: claim-race cancel, returned to queue for queue-stage cancel");
            }
            continue;
        }

        let now = deps.clock.now();
        set_if_absent(&mut job.claimed_at, now);
        job.status = Some(Status::Claimed);
        if let Err(err) = kfax_store::write_job(&dest, &job) {
            warn!(job = %dir_name, error = %err, "submit: failed to persist claimed status");
            continue;
        }

        submit_one(deps, &dest, &mut job, &dir_name).await;
        submitted_count += 1;
    }

    submitted_count
}

async fn submit_one<F, R, M, H, C>(deps: &Deps<F, R, M, H, C>, job_dir: &Path, job: &mut Job, dir_name: &str)
where
    F: FaxBackend,
    R: ReportRenderer,
    M: PdfMerger,
    H: HeaderTool,
    C: Clock,
{
    let job_id = job.id_or(dir_name);
    let plain_document = job_dir.join("doc.pdf");
    if !plain_document.exists() {
        warn!(job = %job_id, "submit: missing doc.pdf, skipped; job remains claimed for operator intervention");
        return;
    }

    let header_variant = job_dir.join("doc_hdr.pdf");
    match deps.header_tool.add_header(&plain_document, &header_variant, deps.config.header_timeout).await {
        Ok(true) => info!(job = %job_id, "submit: header-prefixed variant produced"),
        Ok(false) => {}
        Err(err) => warn!(job = %job_id, error = %err, "submit: header tool failed, sending plain document"),
    }

    let document = variant_to_send(job_dir);
    let number = job.normalized_number();
    if number.is_empty() {
        warn!(job = %job_id, "submit: recipient number is empty after normalization, skipped; job remains claimed for operator intervention");
        return;
    }

    match deps.fax.submit(&number, &document, deps.config.send_timeout).await {
        Ok(outcome) => {
            job.hylafax.sendfax_rc = outcome.rc.map(i64::from);
            job.hylafax.sendfax_out = Some(outcome.stdout);
            job.hylafax.sendfax_err = Some(outcome.stderr);
            match outcome.jid {
                Some(jid) => {
                    job.hylafax.jid = Some(jid);
                    let now = deps.clock.now();
                    set_if_absent(&mut job.submitted_at, now);
                    job.status = Some(Status::Submitted);
                    info!(job = %job_id, jid, "submit: sendfax accepted");
                }
                None => {
                    job.status = Some(Status::Failed);
                    warn!(job = %job_id, "submit: sendfax returned no request id, marking failed");
                }
            }
        }
        Err(err) => {
            job.status = Some(Status::Failed);
            if matches!(err, kfax_adapters::AdapterError::Timeout { .. }) {
                job.hylafax.sendfax_err = Some("sendfax timeout".to_string());
                set_if_absent(&mut job.result_mut().reason, "sendfax timeout".to_string());
            } else {
                job.hylafax.sendfax_err = Some(err.to_string());
            }
            warn!(job = %job_id, error = %err, "submit: sendfax invocation failed");
        }
    }

    if let Err(err) = kfax_store::write_job(job_dir, job) {
        warn!(job = %job_id, error = %err, "submit: failed to persist post-submit job.json");
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
