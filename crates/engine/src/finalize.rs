// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Archival Materialiser's trigger (§4.8): for every `processing/` job
//! with a submitted id, looks for its completion record, populates the
//! result, routes to success or failure, and hands off to
//! [`crate::archival::materialize`].

use kfax_adapters::{FaxBackend, HeaderTool, PdfMerger, ReportRenderer};
use kfax_core::{job::set_if_absent, Clock, Status};
use tracing::{info, warn};

use crate::archival::materialize;
use crate::deps::Deps;
use crate::document::variant_to_send;

pub async fn finalize_sweep<F, R, M, H, C>(deps: &Deps<F, R, M, H, C>) -> usize
where
    F: FaxBackend,
    R: ReportRenderer,
    M: PdfMerger,
    H: HeaderTool,
    C: Clock,
{
    let processing_dir = deps.config.processing_dir();
    let mut finalized = 0;

    for job_dir in kfax_store::list_job_dirs(&processing_dir) {
        let Some(dir_name) = job_dir.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        let mut job = match kfax_store::read_job(&job_dir) {
            Ok(job) => job,
            Err(kfax_store::StoreError::NotFound(_)) => continue,
            Err(err) => {
                warn!(job = %dir_name, error = %err, "finalize: failed to read job.json, skipping");
                continue;
            }
        };

        let Some(jid) = job.hylafax.jid else {
            continue;
        };

        let job_id = job.id_or(&dir_name);

        let Some(record) = deps.fax.read_doneq(jid) else {
            if let Some(since) = job.submitted_at.or(job.claimed_at) {
                let stuck_for = deps.clock.now().signed_duration_since(since);
                if stuck_for.to_std().map(|d| d >= deps.config.finalize_timeout).unwrap_or(false) {
                    warn!(
                        job = %job_id,
                        jid,
                        elapsed = %kfax_core::time_fmt::format_elapsed(stuck_for.num_seconds().max(0) as u64),
                        "finalize: no completion record past the finalize timeout; awaiting operator intervention"
                    );
                }
            }
            continue;
        };

        let now = deps.clock.now();
        {
            let result = job.result_mut();
            result.statuscode = record.statuscode;
            result.npages = record.npages;
            result.totpages = record.totpages;
            result.signalrate = record.signalrate.clone().unwrap_or_default();
            result.csi = record.csi.clone().unwrap_or_default();
            result.commid = record.commid.clone().unwrap_or_default();
        }

        set_if_absent(&mut job.finalizing_at, now);
        set_if_absent(&mut job.finalized_at, now);
        set_if_absent(&mut job.end_time, now);

        let is_success = if job.cancel_requested() {
            set_if_absent(&mut job.result_mut().reason, "cancelled".to_string());
            false
        } else if record.is_success() {
            set_if_absent(&mut job.result_mut().reason, "OK".to_string());
            true
        } else {
            set_if_absent(&mut job.result_mut().reason, "unknown".to_string());
            false
        };
        job.status = Some(if is_success { Status::Ok } else { Status::Failed });

        if let Err(err) = kfax_store::write_job(&job_dir, &job) {
            warn!(job = %job_id, error = %err, "finalize: failed to persist pre-archival job.json, retrying next tick");
            continue;
        }

        let doneq_path = deps.config.doneq_dir.join(format!("q{jid}"));
        let document = variant_to_send(&job_dir);

        match materialize(deps, &job_dir, &mut job, &job_id, Some(&doneq_path), &document, is_success, !is_success)
            .await
        {
            Ok(()) => {
                info!(job = %job_id, jid, success = is_success, "finalize: archived");
                finalized += 1;
            }
            Err(err) => {
                warn!(job = %job_id, jid, error = %err, "finalize: archival failed, retrying next tick");
            }
        }
    }

    finalized
}

#[cfg(test)]
#[path = "finalize_tests.rs"]
mod tests;
