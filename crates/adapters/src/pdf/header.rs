// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The optional header-prefix tool: `pdf_with_header.sh <in.pdf> <out.pdf>`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::HeaderTool;
use crate::error::AdapterError;
use crate::subprocess::{CommandRunner, CommandSpec};

/// Shells out to the configured header-prefix script. Best-effort by
/// contract: any failure (missing binary, non-zero exit, timeout) is
/// logged and reported as `Ok(false)`, never propagated — submit always
/// has the raw document to fall back to.
pub struct RealHeaderTool<R: CommandRunner> {
    runner: R,
    script: String,
}

impl<R: CommandRunner> RealHeaderTool<R> {
    pub fn new(runner: R, script: impl Into<String>) -> Self {
        Self { runner, script: script.into() }
    }
}

#[async_trait]
impl<R: CommandRunner + Send + Sync> HeaderTool for RealHeaderTool<R> {
    async fn add_header(&self, input: &Path, output: &Path, timeout: Duration) -> Result<bool, AdapterError> {
        let spec = CommandSpec::new(
            self.script.clone(),
            vec![input.display().to_string(), output.display().to_string()],
            timeout,
        );

        match self.runner.run(spec, "pdf_with_header").await {
            Ok(result) if result.success() => Ok(true),
            Ok(result) => {
                warn!(
                    status = ?result.status,
                    stderr = %result.stderr.trim(),
                    "header tool exited non-zero; sending without header"
                );
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "header tool unavailable; sending without header");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
