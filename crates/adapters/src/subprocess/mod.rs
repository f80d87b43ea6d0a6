// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The External Command Runner (§4.3): subprocess invocation with captured
//! output, environment overlay, and timeout. Never passes user input
//! through a shell — every invocation is an explicit argv vector.

mod real;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use real::RealCommandRunner;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCommandRunner, RecordedCall};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AdapterError;

/// A single subprocess invocation: program, argv, an environment overlay
/// applied on top of the inherited environment (e.g. `FAXUSER`), and a
/// hard timeout.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env_overlay: Vec<(String, String)>,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
            env_overlay: Vec::new(),
            timeout,
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_overlay.push((key.into(), value.into()));
        self
    }
}

/// Captured result of a subprocess invocation that did not time out.
/// `status` is `None` if the process was terminated by a signal.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Abstraction over subprocess invocation so the fax backend and PDF
/// collaborators can be tested without spawning real processes.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: CommandSpec, description: &str) -> Result<CommandOutput, AdapterError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
