// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted, in-memory doubles for the PDF collaborators. Each fake writes
//! a marker file at the requested output path (so callers that check for
//! the file's existence see realistic behaviour) and records every call.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{HeaderTool, PdfMerger, ReportRenderer};
use crate::error::AdapterError;

#[derive(Debug, Clone, Default)]
pub struct RecordedRender {
    pub job_json: PathBuf,
    pub doneq_record: Option<PathBuf>,
    pub out_report: PathBuf,
}

#[derive(Default)]
pub struct FakeReportRenderer {
    fail_next: Mutex<bool>,
    calls: Mutex<Vec<RecordedRender>>,
}

impl FakeReportRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_call(&self) {
        #[allow(clippy::unwrap_used)]
        { *self.fail_next.lock().unwrap() = true; }
    }

    pub fn calls(&self) -> Vec<RecordedRender> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRenderer for FakeReportRenderer {
    async fn render(
        &self,
        job_json: &Path,
        doneq_record: Option<&Path>,
        out_report: &Path,
        _timeout: Duration,
    ) -> Result<(), AdapterError> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().push(RecordedRender {
            job_json: job_json.to_path_buf(),
            doneq_record: doneq_record.map(Path::to_path_buf),
            out_report: out_report.to_path_buf(),
        });

        #[allow(clippy::unwrap_used)]
        let mut fail_next = self.fail_next.lock().unwrap();
        if *fail_next {
            *fail_next = false;
            return Err(AdapterError::Spawn {
                description: "report-renderer".to_string(),
                source: std::io::Error::other("scripted report renderer failure"),
            });
        }
        drop(fail_next);

        std::fs::write(out_report, b"%PDF-fake-report\n")
            .map_err(|source| AdapterError::Io { description: "write fake report".to_string(), source })
    }
}

#[derive(Default)]
pub struct FakePdfMerger {
    fail_next: Mutex<bool>,
    calls: Mutex<Vec<(PathBuf, PathBuf, PathBuf)>>,
}

impl FakePdfMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_call(&self) {
        #[allow(clippy::unwrap_used)]
        { *self.fail_next.lock().unwrap() = true; }
    }

    pub fn calls(&self) -> Vec<(PathBuf, PathBuf, PathBuf)> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PdfMerger for FakePdfMerger {
    async fn merge(&self, report: &Path, document: &Path, out: &Path, _timeout: Duration) -> Result<(), AdapterError> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().push((report.to_path_buf(), document.to_path_buf(), out.to_path_buf()));

        #[allow(clippy::unwrap_used)]
        let mut fail_next = self.fail_next.lock().unwrap();
        if *fail_next {
            *fail_next = false;
            return Err(AdapterError::Spawn {
                description: "qpdf".to_string(),
                source: std::io::Error::other("scripted merge failure"),
            });
        }
        drop(fail_next);

        std::fs::write(out, b"%PDF-fake-merged\n")
            .map_err(|source| AdapterError::Io { description: "write fake merged pdf".to_string(), source })
    }
}

#[derive(Default)]
pub struct FakeHeaderTool {
    produce: Mutex<bool>,
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl FakeHeaderTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the next (and all subsequent, until called
    /// again) invocations succeed in producing the header variant.
    pub fn set_produces_header(&self, produce: bool) {
        #[allow(clippy::unwrap_used)]
        { *self.produce.lock().unwrap() = produce; }
    }

    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HeaderTool for FakeHeaderTool {
    async fn add_header(&self, input: &Path, output: &Path, _timeout: Duration) -> Result<bool, AdapterError> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().push((input.to_path_buf(), output.to_path_buf()));

        #[allow(clippy::unwrap_used)]
        let produce = *self.produce.lock().unwrap();
        if produce {
            std::fs::write(output, b"%PDF-fake-header\n")
                .map_err(|source| AdapterError::Io { description: "write fake header variant".to_string(), source })?;
        }
        Ok(produce)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
