// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted, in-memory [`FaxBackend`] for engine and daemon tests. Every
//! call is recorded; submit/cancel/faxstat responses are queued per-call,
//! falling back to a benign default when nothing is queued.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{DoneqRecord, FaxBackend, FaxstatRow, SubmitOutcome};
use crate::error::AdapterError;
use crate::subprocess::CommandOutput;

#[derive(Debug, Clone)]
pub struct RecordedSubmit {
    pub number: String,
    pub document: PathBuf,
}

enum QueuedSubmit {
    Outcome(SubmitOutcome),
    Timeout,
}

enum QueuedCancel {
    Output(CommandOutput),
    Timeout,
}

enum QueuedFaxstat {
    Rows(BTreeMap<i64, FaxstatRow>),
    Err,
}

#[derive(Default)]
struct FakeState {
    submits: VecDeque<QueuedSubmit>,
    cancels: VecDeque<QueuedCancel>,
    faxstats: VecDeque<QueuedFaxstat>,
    doneqs: HashMap<i64, DoneqRecord>,
    recorded_submits: Vec<RecordedSubmit>,
    recorded_cancels: Vec<i64>,
}

#[derive(Default)]
pub struct FakeFaxBackend {
    state: Mutex<FakeState>,
}

impl FakeFaxBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_submit_success(&self, jid: i64) {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().submits.push_back(QueuedSubmit::Outcome(SubmitOutcome {
            rc: Some(0),
            stdout: format!("request id is {jid}\n"),
            stderr: String::new(),
            jid: Some(jid),
        }));
    }

    pub fn queue_submit_failure(&self, rc: i32, stderr: &str) {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().submits.push_back(QueuedSubmit::Outcome(SubmitOutcome {
            rc: Some(rc),
            stdout: String::new(),
            stderr: stderr.to_string(),
            jid: None,
        }));
    }

    pub fn queue_submit_timeout(&self) {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().submits.push_back(QueuedSubmit::Timeout);
    }

    pub fn queue_cancel_success(&self) {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().cancels.push_back(QueuedCancel::Output(CommandOutput {
            status: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }));
    }

    pub fn queue_cancel_timeout(&self) {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().cancels.push_back(QueuedCancel::Timeout);
    }

    pub fn queue_faxstat_rows(&self, rows: BTreeMap<i64, FaxstatRow>) {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().faxstats.push_back(QueuedFaxstat::Rows(rows));
    }

    pub fn queue_faxstat_error(&self) {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().faxstats.push_back(QueuedFaxstat::Err);
    }

    pub fn set_doneq(&self, jid: i64, record: DoneqRecord) {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().doneqs.insert(jid, record);
    }

    pub fn recorded_submits(&self) -> Vec<RecordedSubmit> {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().recorded_submits.clone()
    }

    pub fn recorded_cancels(&self) -> Vec<i64> {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().recorded_cancels.clone()
    }
}

#[async_trait]
impl FaxBackend for FakeFaxBackend {
    async fn submit(&self, number: &str, document: &Path, _timeout: Duration) -> Result<SubmitOutcome, AdapterError> {
        #[allow(clippy::unwrap_used)]
        let mut state = self.state.lock().unwrap();
        state.recorded_submits.push(RecordedSubmit {
            number: number.to_string(),
            document: document.to_path_buf(),
        });
        match state.submits.pop_front() {
            Some(QueuedSubmit::Outcome(outcome)) => Ok(outcome),
            Some(QueuedSubmit::Timeout) => Err(AdapterError::Timeout {
                description: "sendfax".to_string(),
                timeout_secs: _timeout.as_secs(),
            }),
            None => Ok(SubmitOutcome::default()),
        }
    }

    async fn cancel(&self, jid: i64, _timeout: Duration) -> Result<CommandOutput, AdapterError> {
        #[allow(clippy::unwrap_used)]
        let mut state = self.state.lock().unwrap();
        state.recorded_cancels.push(jid);
        match state.cancels.pop_front() {
            Some(QueuedCancel::Output(output)) => Ok(output),
            Some(QueuedCancel::Timeout) => Err(AdapterError::Timeout {
                description: "faxrm".to_string(),
                timeout_secs: _timeout.as_secs(),
            }),
            None => Ok(CommandOutput {
                status: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            }),
        }
    }

    async fn faxstat(&self, timeout: Duration) -> Result<BTreeMap<i64, FaxstatRow>, AdapterError> {
        #[allow(clippy::unwrap_used)]
        let mut state = self.state.lock().unwrap();
        match state.faxstats.pop_front() {
            Some(QueuedFaxstat::Rows(rows)) => Ok(rows),
            Some(QueuedFaxstat::Err) => Err(AdapterError::Spawn {
                description: "faxstat".to_string(),
                source: std::io::Error::other("scripted faxstat failure"),
            }),
            None => {
                let _ = timeout;
                Ok(BTreeMap::new())
            }
        }
    }

    fn read_doneq(&self, jid: i64) -> Option<DoneqRecord> {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().doneqs.get(&jid).cloned()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
