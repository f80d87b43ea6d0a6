// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The report-renderer collaborator: turns a job's metadata (and, when
//! available, its completion record) into a human-readable status report.
//! Treated as opaque — this crate knows only its argv contract, not how it
//! lays out the page.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use super::ReportRenderer;
use crate::error::AdapterError;
use crate::subprocess::{CommandRunner, CommandSpec};

/// Shells out to the configured report renderer with
/// `<bin> --job <job.json> [--doneq <doneq-record>] --out <report.pdf>`.
/// When the job was never submitted (queue-stage cancel), `doneq_record`
/// is omitted and the renderer is expected to produce a report with no
/// transmission fields.
pub struct RealReportRenderer<R: CommandRunner> {
    runner: R,
    bin: String,
}

impl<R: CommandRunner> RealReportRenderer<R> {
    pub fn new(runner: R, bin: impl Into<String>) -> Self {
        Self { runner, bin: bin.into() }
    }
}

#[async_trait]
impl<R: CommandRunner + Send + Sync> ReportRenderer for RealReportRenderer<R> {
    async fn render(
        &self,
        job_json: &Path,
        doneq_record: Option<&Path>,
        out_report: &Path,
        timeout: Duration,
    ) -> Result<(), AdapterError> {
        let mut args = vec!["--job".to_string(), job_json.display().to_string()];
        if let Some(doneq) = doneq_record {
            args.push("--doneq".to_string());
            args.push(doneq.display().to_string());
        }
        args.push("--out".to_string());
        args.push(out_report.display().to_string());

        let spec = CommandSpec::new(self.bin.clone(), args, timeout);
        let output = self.runner.run(spec, "report-renderer").await?;
        if !output.success() {
            return Err(AdapterError::Spawn {
                description: "report-renderer".to_string(),
                source: std::io::Error::other(format!(
                    "report renderer exited with {:?}: {}",
                    output.status,
                    output.stderr.trim()
                )),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
