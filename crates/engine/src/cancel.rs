// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Cancel Subsystem (§4.5): two of its three entry points. The third,
//! claim-race cancel, lives in [`crate::submit`] since it only happens
//! inline with a claim attempt.

use kfax_adapters::{FaxBackend, HeaderTool, PdfMerger, ReportRenderer};
use kfax_core::Clock;
use tracing::{info, warn};

use crate::archival::materialize;
use crate::deps::Deps;
use crate::document::variant_to_send;

/// Queue-stage cancel: a job still sitting in `queue/` with
/// `cancel.requested = true`. No backend call is ever made (the job was
/// never submitted), so this is gated purely on `cancel.requested`, not on
/// `cancel.handled_at` — unlike processing-stage cancel, re-running it is
/// always safe, which is exactly what lets a job whose prior archival
/// attempt failed retry on the next tick.
pub async fn queue_cancel_sweep<F, R, M, H, C>(deps: &Deps<F, R, M, H, C>) -> usize
where
    F: FaxBackend,
    R: ReportRenderer,
    M: PdfMerger,
    H: HeaderTool,
    C: Clock,
{
    let queue_dir = deps.config.queue_dir();
    let mut handled = 0;

    for job_dir in kfax_store::list_job_dirs(&queue_dir) {
        let Some(dir_name) = job_dir.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        let mut job = match kfax_store::read_job(&job_dir) {
            Ok(job) => job,
            Err(kfax_store::StoreError::NotFound(_)) => continue,
            Err(err) => {
                warn!(job = %dir_name, error = %err, "queue-cancel: failed to read job.json, skipping");
                continue;
            }
        };

        if !job.cancel_requested() {
            continue;
        }

        let job_id = job.id_or(&dir_name);
        let now = deps.clock.now();

        kfax_core::job::set_if_absent(&mut job.claimed_at, now);
        kfax_core::job::set_if_absent(&mut job.submitted_at, now);
        kfax_core::job::set_if_absent(&mut job.finalizing_at, now);
        kfax_core::job::set_if_absent(&mut job.finalized_at, now);
        kfax_core::job::set_if_absent(&mut job.end_time, now);
        kfax_core::job::set_if_absent(&mut job.result_mut().reason, "cancelled".to_string());
        job.status = Some(kfax_core::Status::Failed);
        job.mark_cancel_handled(now);

        if let Err(err) = kfax_store::write_job(&job_dir, &job) {
            warn!(job = %job_id, error = %err, "queue-cancel: failed to persist job.json, retrying next tick");
            continue;
        }

        let document = variant_to_send(&job_dir);
        match materialize(deps, &job_dir, &mut job, &job_id, None, &document, false, true).await {
            Ok(()) => {
                info!(job = %job_id, "queue-cancel: archived as failed, job directory removed");
                handled += 1;
            }
            Err(err) => {
                warn!(job = %job_id, error = %err, "queue-cancel: archival failed, retrying next tick");
            }
        }
    }

    handled
}

/// Processing-stage cancel: a job in `processing/` with a submitted
/// `hylafax.jid` and `cancel.requested = true`. Gated on `!handled_at`
/// because this path, unlike queue-stage cancel, makes a real backend
/// call (`faxrm`) — the invariant "no subsequent backend action once
/// handled" applies here specifically.
pub async fn processing_cancel_sweep<F, R, M, H, C>(deps: &Deps<F, R, M, H, C>) -> usize
where
    F: FaxBackend,
    R: ReportRenderer,
    M: PdfMerger,
    H: HeaderTool,
    C: Clock,
{
    let processing_dir = deps.config.processing_dir();
    let mut handled = 0;

    for job_dir in kfax_store::list_job_dirs(&processing_dir) {
        let Some(dir_name) = job_dir.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        let mut job = match kfax_store::read_job(&job_dir) {
            Ok(job) => job,
            Err(kfax_store::StoreError::NotFound(_)) => continue,
            Err(err) => {
                warn!(job = %dir_name, error = %err, "processing-cancel: failed to read job.json, skipping");
                continue;
            }
        };

        if !job.cancel_requested() || job.cancel_handled() {
            continue;
        }

        let Some(jid) = job.hylafax.jid else {
            // No id yet: this job hasn't finished submitting this tick.
            // Left to the claim-race path or a future tick, not here.
            continue;
        };

        let job_id = job.id_or(&dir_name);

        if let Err(err) = deps.fax.cancel(jid, deps.config.faxrm_timeout).await {
            warn!(job = %job_id, jid, error = %err, "processing-cancel: faxrm call failed, marking handled anyway");
        }

        tokio::time::sleep(deps.config.cancel_postwait).await;

        let now = deps.clock.now();
        job.mark_cancel_handled(now);
        if let Err(err) = kfax_store::write_job(&job_dir, &job) {
            warn!(job = %job_id, error = %err, "processing-cancel: failed to persist job.json");
            continue;
        }

        info!(job = %job_id, jid, "processing-cancel: faxrm invoked, cancel marked handled");
        handled += 1;
    }

    handled
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
