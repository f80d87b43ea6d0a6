// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses the HylaFAX request id out of `sendfax`'s combined output.

use regex::Regex;
use std::sync::OnceLock;

fn request_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::unwrap_used)]
    RE.get_or_init(|| Regex::new(r"request id is\s+(\d+)").unwrap())
}

/// Finds `request id is <N>` in stdout, falling back to stderr. Exit code
/// is recorded separately and does not by itself determine success — id
/// presence does.
pub fn parse_sendfax_jid(stdout: &str, stderr: &str) -> Option<i64> {
    request_id_re()
        .captures(stdout)
        .or_else(|| request_id_re().captures(stderr))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
#[path = "sendfax_tests.rs"]
mod tests;
