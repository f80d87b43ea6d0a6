// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use tokio::process::Command;

use super::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::AdapterError;

/// Production command runner: spawns a real child process, captures both
/// streams as text, and enforces the caller-supplied timeout. On timeout
/// the child is killed (via `Child`'s drop); sibling processes started by
/// other adapters are unaffected.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealCommandRunner;

#[async_trait]
impl CommandRunner for RealCommandRunner {
    async fn run(&self, spec: CommandSpec, description: &str) -> Result<CommandOutput, AdapterError> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        for (key, value) in &spec.env_overlay {
            cmd.env(key, value);
        }

        let description = description.to_string();
        match tokio::time::timeout(spec.timeout, cmd.output()).await {
            Ok(Ok(output)) => Ok(CommandOutput {
                status: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(Err(source)) => Err(AdapterError::Spawn { description, source }),
            Err(_elapsed) => Err(AdapterError::Timeout {
                description,
                timeout_secs: spec.timeout.as_secs(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "real_tests.rs"]
mod tests;
