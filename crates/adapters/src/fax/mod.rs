// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Fax Backend Adapter (§4.4): thin, well-typed wrappers over
//! `sendfax`, `faxrm`, `faxstat -sal`, and the `doneq/q<JID>` completion
//! record file.

mod doneq;
mod faxstat;
mod real;
mod sendfax;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use doneq::{parse_doneq_text, DoneqRecord};
pub use faxstat::{parse_faxstat_sal, parse_ratio, FaxstatRow};
pub use real::RealFaxBackend;
pub use sendfax::parse_sendfax_jid;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeFaxBackend;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AdapterError;
use crate::subprocess::CommandOutput;

/// Forensics from the last `sendfax` attempt, recorded on the job
/// regardless of outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub rc: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub jid: Option<i64>,
}

/// Wraps the HylaFAX-compatible CLI tools this daemon drives. A real
/// implementation shells out via a [`crate::CommandRunner`]; a fake
/// implementation (behind `test-support`) is scripted in-memory.
#[async_trait]
pub trait FaxBackend: Send + Sync {
    /// Invokes the submit tool non-interactively. Exit code is recorded
    /// but does not by itself determine success — `jid` presence does.
    async fn submit(&self, number: &str, document: &Path, timeout: Duration) -> Result<SubmitOutcome, AdapterError>;

    /// Invokes the remove tool for a previously-submitted request id.
    /// Timeouts are the caller's to tolerate (§4.5): this only reports
    /// them, it never panics or retries.
    async fn cancel(&self, jid: i64, timeout: Duration) -> Result<CommandOutput, AdapterError>;

    /// Invokes the status tool and parses its table.
    async fn faxstat(&self, timeout: Duration) -> Result<BTreeMap<i64, FaxstatRow>, AdapterError>;

    /// Reads and parses the completion record for `jid`, if present.
    fn read_doneq(&self, jid: i64) -> Option<DoneqRecord>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
