// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The PDF collaborators (§1 "Out of scope"): the report renderer, the
//! page-merge utility, and the optional header-prefix tool. All three are
//! treated as opaque command-shaped operations — this crate only knows
//! their argv contract, never their internals.

mod header;
mod merge;
mod report;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use header::RealHeaderTool;
pub use merge::RealPdfMerger;
pub use report::RealReportRenderer;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHeaderTool, FakePdfMerger, FakeReportRenderer};

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AdapterError;

/// Builds the human-readable status report for a job (§4.8 step 5). Given
/// the job's metadata file and, when the job was actually submitted, its
/// completion record, produces a single-page-or-more report PDF at `out`.
///
/// Unlike the header tool, failure here is not best-effort: the caller must
/// retry the job next tick rather than silently lose the report (§7).
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(
        &self,
        job_json: &Path,
        doneq_record: Option<&Path>,
        out_report: &Path,
        timeout: Duration,
    ) -> Result<(), AdapterError>;
}

/// Merges the report PDF with the document PDF into one archive-ready file
/// (§4.8 step 6): `qpdf --empty --pages <report> <document> -- <out>`. Report
/// pages come first, document pages follow.
#[async_trait]
pub trait PdfMerger: Send + Sync {
    async fn merge(&self, report: &Path, document: &Path, out: &Path, timeout: Duration) -> Result<(), AdapterError>;
}

/// Best-effort header-prefix tool. Submit always attempts this; absence or
/// failure is not an error — the caller falls back to the raw document.
/// Returns whether `output` was actually produced.
#[async_trait]
pub trait HeaderTool: Send + Sync {
    async fn add_header(&self, input: &Path, output: &Path, timeout: Duration) -> Result<bool, AdapterError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
