// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduler's fixed per-tick sweep order (§4.6): queue-cancel,
//! processing-cancel, finalize, live-status refresh, submit. The order
//! matters — cancel sweeps run before finalize so a job cancelled this
//! tick is routed to the failure path rather than racing a completion
//! record, and submission runs last so a job that frees an inflight slot
//! this tick (via finalize) can be replaced in the same tick.

use kfax_adapters::{FaxBackend, HeaderTool, PdfMerger, ReportRenderer};
use kfax_core::Clock;
use tracing::debug;

use crate::cancel::{processing_cancel_sweep, queue_cancel_sweep};
use crate::deps::Deps;
use crate::finalize::finalize_sweep;
use crate::live_status::LiveRefresher;
use crate::submit::submit_sweep;

/// Per-sweep counts from a single [`Tick::run_once`] call, useful for
/// daemon-level logging and for tests asserting on scheduler behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub queue_cancelled: usize,
    pub processing_cancelled: usize,
    pub finalized: usize,
    pub live_refreshed: usize,
    pub submitted: usize,
}

/// Drives one full sweep cycle. Owns the live-status refresher's
/// rate-limiter state across ticks; everything else is re-derived from the
/// filesystem on every call, so a `Tick` carries no other state of its own.
pub struct Tick<F, R, M, H, C> {
    deps: Deps<F, R, M, H, C>,
    live_refresher: LiveRefresher,
}

impl<F, R, M, H, C> Tick<F, R, M, H, C>
where
    F: FaxBackend,
    R: ReportRenderer,
    M: PdfMerger,
    H: HeaderTool,
    C: Clock,
{
    pub fn new(deps: Deps<F, R, M, H, C>) -> Self {
        Self { deps, live_refresher: LiveRefresher::new() }
    }

    pub fn deps(&self) -> &Deps<F, R, M, H, C> {
        &self.deps
    }

    pub async fn run_once(&mut self) -> TickSummary {
        let queue_cancelled = queue_cancel_sweep(&self.deps).await;
        let processing_cancelled = processing_cancel_sweep(&self.deps).await;
        let finalized = finalize_sweep(&self.deps).await;
        let live_refreshed = self.live_refresher.refresh(&self.deps).await;
        let submitted = submit_sweep(&self.deps).await;

        let summary = TickSummary {
            queue_cancelled,
            processing_cancelled,
            finalized,
            live_refreshed,
            submitted,
        };
        debug!(?summary, "tick complete");
        summary
    }
}

#[cfg(test)]
#[path = "tick_tests.rs"]
mod tests;
