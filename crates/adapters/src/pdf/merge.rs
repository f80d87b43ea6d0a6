// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The page-merge utility: `qpdf --empty --pages <report> <document> -- <out>`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use super::PdfMerger;
use crate::error::AdapterError;
use crate::subprocess::{CommandRunner, CommandSpec};

/// Shells out to `qpdf` (or whatever binary `KFAX_QPDF_BIN` names) to
/// concatenate the report pages ahead of the document pages into one file.
/// Unlike the header tool, a failure here is real: finalisation has no
/// fallback and must retry next tick (§7).
pub struct RealPdfMerger<R: CommandRunner> {
    runner: R,
    qpdf_bin: String,
}

impl<R: CommandRunner> RealPdfMerger<R> {
    pub fn new(runner: R, qpdf_bin: impl Into<String>) -> Self {
        Self { runner, qpdf_bin: qpdf_bin.into() }
    }
}

#[async_trait]
impl<R: CommandRunner + Send + Sync> PdfMerger for RealPdfMerger<R> {
    async fn merge(&self, report: &Path, document: &Path, out: &Path, timeout: Duration) -> Result<(), AdapterError> {
        let spec = CommandSpec::new(
            self.qpdf_bin.clone(),
            vec![
                "--empty".to_string(),
                "--pages".to_string(),
                report.display().to_string(),
                document.display().to_string(),
                "--".to_string(),
                out.display().to_string(),
            ],
            timeout,
        );

        let output = self.runner.run(spec, "qpdf").await?;
        if !output.success() {
            return Err(AdapterError::Spawn {
                description: "qpdf".to_string(),
                source: std::io::Error::other(format!(
                    "qpdf exited with {:?}: {}",
                    output.status,
                    output.stderr.trim()
                )),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
