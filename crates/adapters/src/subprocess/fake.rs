// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command runner for testing: scripted responses keyed by program
//! name, with every invocation recorded for assertion.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::AdapterError;

/// A recorded invocation, for assertions in tests.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub env_overlay: Vec<(String, String)>,
}

enum Scripted {
    Output(CommandOutput),
    Timeout,
}

/// Fake [`CommandRunner`]. Responses are queued per program name (FIFO);
/// calling a program with no queued response returns a generic success
/// with empty output.
#[derive(Default)]
pub struct FakeCommandRunner {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    queued: std::collections::HashMap<String, VecDeque<Scripted>>,
    calls: Vec<RecordedCall>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response for the next invocation of `program`.
    pub fn queue_success(&self, program: &str, stdout: &str, stderr: &str) {
        self.queue(program, Scripted::Output(CommandOutput {
            status: Some(0),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }));
    }

    /// Queues a non-zero-exit response for the next invocation of `program`.
    pub fn queue_failure(&self, program: &str, status: i32, stdout: &str, stderr: &str) {
        self.queue(program, Scripted::Output(CommandOutput {
            status: Some(status),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }));
    }

    /// Queues a timeout for the next invocation of `program`.
    pub fn queue_timeout(&self, program: &str) {
        self.queue(program, Scripted::Timeout);
    }

    fn queue(&self, program: &str, scripted: Scripted) {
        #[allow(clippy::unwrap_used)]
        let mut state = self.state.lock().unwrap();
        state.queued.entry(program.to_string()).or_default().push_back(scripted);
    }

    /// Returns every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        #[allow(clippy::unwrap_used)]
        self.state.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl CommandRunner for FakeCommandRunner {
    async fn run(&self, spec: CommandSpec, description: &str) -> Result<CommandOutput, AdapterError> {
        #[allow(clippy::unwrap_used)]
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            program: spec.program.clone(),
            args: spec.args.clone(),
            env_overlay: spec.env_overlay.clone(),
        });

        let scripted = state
            .queued
            .get_mut(&spec.program)
            .and_then(|q| q.pop_front());

        match scripted {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::Timeout) => Err(AdapterError::Timeout {
                description: description.to_string(),
                timeout_secs: spec.timeout.as_secs(),
            }),
            None => Ok(CommandOutput {
                status: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
