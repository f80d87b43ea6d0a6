// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kfaxd`: the supervisor daemon's process shell.
//!
//! Everything that makes decisions about jobs lives in `kfax-engine`; this
//! crate only does what a process needs to do to host that engine: load
//! configuration, create the managed directory tree, take the
//! single-instance lock (§4.2), wire the real adapters together, and run
//! the tick loop until a signal asks it to stop (§6 "Process lifecycle").

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::time::Duration;

use kfax_adapters::{RealCommandRunner, RealFaxBackend, RealHeaderTool, RealPdfMerger, RealReportRenderer};
use kfax_core::{Config, SystemClock};
use kfax_engine::{Deps, Tick};
use thiserror::Error;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

/// The concrete [`Tick`] the daemon binary runs: all five adapters wired
/// to the real subprocess-backed implementations.
pub type RealTick = Tick<
    RealFaxBackend<RealCommandRunner>,
    RealReportRenderer<RealCommandRunner>,
    RealPdfMerger<RealCommandRunner>,
    RealHeaderTool<RealCommandRunner>,
    SystemClock,
>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("another instance is already running (lock held at {path}): {source}")]
    LockHeld {
        path: std::path::PathBuf,
        #[source]
        source: kfax_store::StoreError,
    },
    #[error("failed to create managed directory: {0}")]
    Directory(#[source] kfax_store::StoreError),
    #[error("failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),
}

impl StartupError {
    /// Process exit code: non-zero on lock contention per §6, and on any
    /// other startup failure that prevents the loop from ever running.
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::LockHeld { .. } => 1,
            StartupError::Directory(_) => 1,
            StartupError::Signal(_) => 1,
        }
    }
}

/// Creates the five directories the scheduler reads from and writes into
/// (`queue/`, `processing/`, and the three archive trees). Idempotent:
/// safe to call on every startup.
pub fn ensure_managed_dirs(config: &Config) -> Result<(), StartupError> {
    for dir in config.all_managed_dirs() {
        kfax_store::ensure_dir(&dir).map_err(StartupError::Directory)?;
    }
    Ok(())
}

/// Wires the five real adapters into a [`Deps`] bundle over `config`.
pub fn build_real_deps(config: Config) -> Deps<
    RealFaxBackend<RealCommandRunner>,
    RealReportRenderer<RealCommandRunner>,
    RealPdfMerger<RealCommandRunner>,
    RealHeaderTool<RealCommandRunner>,
    SystemClock,
> {
    let fax = RealFaxBackend::new(RealCommandRunner, &config);
    let report_renderer = RealReportRenderer::new(RealCommandRunner, config.report_renderer_bin.clone());
    let pdf_merger = RealPdfMerger::new(RealCommandRunner, config.qpdf_bin.clone());
    let header_tool = RealHeaderTool::new(RealCommandRunner, config.header_script.display().to_string());
    Deps::new(config, fax, report_renderer, pdf_merger, header_tool, SystemClock)
}

/// Acquires the single-instance lock, ensures the managed directory tree
/// exists, and returns a ready-to-run [`RealTick`] plus the held lock (the
/// caller must keep the lock alive for as long as the loop runs).
pub fn startup(config: Config) -> Result<(RealTick, kfax_store::InstanceLock), StartupError> {
    ensure_managed_dirs(&config)?;

    let lock_path = config.lock_path();
    let lock = kfax_store::InstanceLock::acquire(&lock_path)
        .map_err(|source| StartupError::LockHeld { path: lock_path, source })?;

    let deps = build_real_deps(config);
    Ok((Tick::new(deps), lock))
}

/// Runs the tick loop until SIGINT or SIGTERM, sleeping `poll_interval`
/// between ticks (§5 "suspension points"). Returns once a signal is
/// received; the caller exits 0 afterward (§6).
pub async fn run_loop(tick: &mut RealTick, poll_interval: Duration) -> Result<(), StartupError> {
    let mut sigint = signal(SignalKind::interrupt()).map_err(StartupError::Signal)?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(StartupError::Signal)?;

    loop {
        tokio::select! {
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                return Ok(());
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                return Ok(());
            }
            summary = tick.run_once() => {
                let activity = summary.queue_cancelled
                    + summary.processing_cancelled
                    + summary.finalized
                    + summary.live_refreshed
                    + summary.submitted;
                if activity > 0 {
                    info!(?summary, "tick");
                }
                tokio::time::sleep(poll_interval).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
