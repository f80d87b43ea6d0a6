// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Live-Status Refresher (§4.7): polls `faxstat -sal` no more often
//! than `faxstat_refresh_interval`, and projects matching rows onto each
//! processing job's `live` field. A jid missing from a given poll leaves
//! the job's existing `live` state untouched — it's last-known-good, not
//! ground truth, so a transient gap in the table isn't treated as data
//! loss.

use chrono::{DateTime, Utc};
use kfax_adapters::fax::{parse_ratio, FaxstatRow};
use kfax_adapters::{FaxBackend, HeaderTool, PdfMerger, ReportRenderer};
use kfax_core::{Clock, LiveDials, LiveProgress, LiveState, Status};
use tracing::warn;

use crate::deps::Deps;

/// Whether any `processing/` job has a submitted jid and hasn't reached a
/// terminal status yet — the refresher's whole reason to poll at all.
/// Checked before the rate-limiter so an idle daemon (nothing in flight)
/// never even starts the clock on the next allowed attempt.
fn has_active_job(processing_dir: &std::path::Path) -> bool {
    kfax_store::list_job_dirs(processing_dir).iter().any(|job_dir| {
        kfax_store::read_job(job_dir)
            .map(|job| job.hylafax.jid.is_some() && !matches!(job.status, Some(Status::Ok) | Some(Status::Failed)))
            .unwrap_or(false)
    })
}

/// Owns the cross-tick rate-limiter state: the refresher has no per-job
/// memory, only a single "when did we last even try" timestamp.
#[derive(Default)]
pub struct LiveRefresher {
    last_attempt: Option<DateTime<Utc>>,
}

impl LiveRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<F, R, M, H, C>(&mut self, deps: &Deps<F, R, M, H, C>) -> usize
    where
        F: FaxBackend,
        R: ReportRenderer,
        M: PdfMerger,
        H: HeaderTool,
        C: Clock,
    {
        let processing_dir = deps.config.processing_dir();
        if !has_active_job(&processing_dir) {
            return 0;
        }

        let now = deps.clock.now();
        if let Some(last) = self.last_attempt {
            let due = now.signed_duration_since(last).to_std().unwrap_or_default() >= deps.config.faxstat_refresh_interval;
            if !due {
                return 0;
            }
        }
        self.last_attempt = Some(now);

        let rows = match deps.fax.faxstat(deps.config.faxstat_timeout).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "live-status: faxstat call failed, keeping last-known state");
                return 0;
            }
        };

        let mut updated = 0;

        for job_dir in kfax_store::list_job_dirs(&processing_dir) {
            let Ok(mut job) = kfax_store::read_job(&job_dir) else {
                continue;
            };
            let Some(jid) = job.hylafax.jid else {
                continue;
            };
            let Some(row) = rows.get(&jid) else {
                continue;
            };

            job.live = Some(project_row(row, now));
            if let Err(err) = kfax_store::write_job(&job_dir, &job) {
                warn!(jid, error = %err, "live-status: failed to persist refreshed job.json");
                continue;
            }
            updated += 1;
        }

        updated
    }
}

fn project_row(row: &FaxstatRow, now: DateTime<Utc>) -> LiveState {
    let (sent, total) = parse_ratio(&row.pages);
    let (done, max) = parse_ratio(&row.dials);

    LiveState {
        updated_at: Some(now),
        progress: Some(LiveProgress { sent: sent.unwrap_or(0), total: total.unwrap_or(0), raw: row.pages.clone() }),
        dials: Some(LiveDials { done: done.unwrap_or(0), max: max.unwrap_or(0), raw: row.dials.clone() }),
        tts: Some(row.tts.clone()),
        state: Some(row.state.clone()),
        faxstat_status: Some(row.status.clone()),
    }
}

#[cfg(test)]
#[path = "live_status_tests.rs"]
mod tests;
