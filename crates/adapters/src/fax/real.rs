// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use kfax_core::Config;

use super::{parse_doneq_text, parse_faxstat_sal, parse_sendfax_jid, DoneqRecord, FaxBackend, FaxstatRow, SubmitOutcome};
use crate::error::AdapterError;
use crate::subprocess::{CommandOutput, CommandRunner, CommandSpec};

/// Production fax backend: shells out to the HylaFAX-compatible CLI tools
/// via a [`CommandRunner`], and reads the completion record directly off
/// disk (not a subprocess — `doneq/` is a plain spool directory).
///
/// `FAXUSER` is overlaid on every subprocess call this adapter makes
/// (submit, cancel, status), per the recovered behaviour of the original
/// implementation.
pub struct RealFaxBackend<R: CommandRunner> {
    runner: R,
    sendfax_bin: String,
    faxrm_bin: String,
    faxstat_bin: String,
    fax_host: String,
    fax_user: String,
    doneq_dir: PathBuf,
}

impl<R: CommandRunner> RealFaxBackend<R> {
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            sendfax_bin: config.sendfax_bin.clone(),
            faxrm_bin: config.faxrm_bin.clone(),
            faxstat_bin: config.faxstat_bin.clone(),
            fax_host: config.fax_host.clone(),
            fax_user: config.fax_user.clone(),
            doneq_dir: config.doneq_dir.clone(),
        }
    }
}

#[async_trait]
impl<R: CommandRunner + Send + Sync> FaxBackend for RealFaxBackend<R> {
    async fn submit(&self, number: &str, document: &Path, timeout: Duration) -> Result<SubmitOutcome, AdapterError> {
        let spec = CommandSpec::new(
            self.sendfax_bin.clone(),
            vec![
                "-n".to_string(),
                "-d".to_string(),
                number.to_string(),
                document.display().to_string(),
            ],
            timeout,
        )
        .with_env("FAXUSER", &self.fax_user);

        match self.runner.run(spec, "sendfax").await {
            Ok(CommandOutput { status, stdout, stderr }) => Ok(SubmitOutcome {
                jid: parse_sendfax_jid(&stdout, &stderr),
                rc: status,
                stdout,
                stderr,
            }),
            Err(err) => Err(err),
        }
    }

    async fn cancel(&self, jid: i64, timeout: Duration) -> Result<CommandOutput, AdapterError> {
        let spec = CommandSpec::new(
            self.faxrm_bin.clone(),
            vec!["-h".to_string(), self.fax_host.clone(), jid.to_string()],
            timeout,
        )
        .with_env("FAXUSER", &self.fax_user);
        self.runner.run(spec, "faxrm").await
    }

    async fn faxstat(&self, timeout: Duration) -> Result<BTreeMap<i64, FaxstatRow>, AdapterError> {
        let spec = CommandSpec::new(
            self.faxstat_bin.clone(),
            vec!["-sal".to_string(), "-h".to_string(), self.fax_host.clone()],
            timeout,
        )
        .with_env("FAXUSER", &self.fax_user);

        let output = self.runner.run(spec, "faxstat").await?;
        if !output.success() {
            return Err(AdapterError::Spawn {
                description: "faxstat".to_string(),
                source: std::io::Error::other(format!(
                    "faxstat exited with {:?}: {}",
                    output.status,
                    output.stderr.trim()
                )),
            });
        }
        Ok(parse_faxstat_sal(&output.stdout))
    }

    fn read_doneq(&self, jid: i64) -> Option<DoneqRecord> {
        let path = self.doneq_dir.join(format!("q{jid}"));
        let text = std::fs::read_to_string(path).ok()?;
        Some(parse_doneq_text(&text))
    }
}

#[cfg(test)]
#[path = "real_tests.rs"]
mod tests;
