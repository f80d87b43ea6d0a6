// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses the `faxstat -sal` live status table.

use std::collections::BTreeMap;

/// One row of the live status table, columns as the source names them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaxstatRow {
    pub jid: i64,
    pub pri: String,
    pub state: String,
    pub owner: String,
    pub number: String,
    pub pages: String,
    pub dials: String,
    pub tts: String,
    pub status: String,
}

/// Parses a `done:max`-shaped ratio column into `(Some, Some)`, or
/// `(None, None)` if malformed.
pub fn parse_ratio(s: &str) -> (Option<i64>, Option<i64>) {
    let s = s.trim();
    let Some((a, b)) = s.split_once(':') else {
        return (None, None);
    };
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(a), Ok(b)) => (Some(a), Some(b)),
        _ => (None, None),
    }
}

/// Locates the header row (the first line whose trimmed content starts
/// with `JID`), then parses every subsequent whitespace-delimited row
/// whose first token is numeric. Returns an empty map if no header is
/// found. Columns: jid, priority, state, owner, number, pages (`sent:total`),
/// dials (`done:max`), tts, status (free-form tail).
pub fn parse_faxstat_sal(text: &str) -> BTreeMap<i64, FaxstatRow> {
    let mut rows = BTreeMap::new();

    let mut lines = text.lines();
    let mut found_header = false;
    for line in lines.by_ref() {
        if line.trim_start().starts_with("JID") {
            found_header = true;
            break;
        }
    }
    if !found_header {
        return rows;
    }

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let toks: Vec<&str> = line.split_whitespace().collect();
        if toks.len() < 7 {
            continue;
        }
        if toks[0].is_empty() || !toks[0].bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let Ok(jid) = toks[0].parse::<i64>() else {
            continue;
        };

        let row = FaxstatRow {
            jid,
            pri: toks.get(1).copied().unwrap_or("").to_string(),
            state: toks.get(2).copied().unwrap_or("").to_string(),
            owner: toks.get(3).copied().unwrap_or("").to_string(),
            number: toks.get(4).copied().unwrap_or("").to_string(),
            pages: toks.get(5).copied().unwrap_or("").to_string(),
            dials: toks.get(6).copied().unwrap_or("").to_string(),
            tts: toks.get(7).copied().unwrap_or("").to_string(),
            status: if toks.len() > 8 { toks[8..].join(" ") } else { String::new() },
        };
        rows.insert(jid, row);
    }

    rows
}

#[cfg(test)]
#[path = "faxstat_tests.rs"]
mod tests;
