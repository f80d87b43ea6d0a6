// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses the HylaFAX completion record (`doneq/q<JID>`): a line-oriented
//! `key: value` file. The sole positive success signal is `statuscode = 0`.

use std::collections::BTreeMap;

/// A parsed completion record. Integer fields are `None` when absent or
/// unparseable — never coerced to zero, since zero is itself a meaningful
/// (successful) `statuscode`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoneqRecord {
    pub statuscode: Option<i64>,
    pub npages: Option<i64>,
    pub totpages: Option<i64>,
    pub signalrate: Option<String>,
    pub csi: Option<String>,
    pub commid: Option<String>,
    pub tts: Option<i64>,
    pub returned: Option<i64>,
    /// Every key seen, raw, including ones this struct doesn't model.
    pub raw: BTreeMap<String, String>,
}

impl DoneqRecord {
    pub fn is_success(&self) -> bool {
        self.statuscode == Some(0)
    }
}

/// Parses `key: value` lines. Blank lines and lines without a `:` are
/// skipped. Unknown keys are preserved in `raw`; known integer keys that
/// fail to parse become `None`, not `0`.
pub fn parse_doneq_text(text: &str) -> DoneqRecord {
    let mut raw = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        raw.insert(key.trim().to_string(), value.trim().to_string());
    }

    let geti = |key: &str| -> Option<i64> {
        raw.get(key).filter(|v| !v.is_empty()).and_then(|v| v.parse().ok())
    };
    let gets = |key: &str| -> Option<String> { raw.get(key).cloned() };

    DoneqRecord {
        statuscode: geti("statuscode"),
        npages: geti("npages"),
        totpages: geti("totpages"),
        signalrate: gets("signalrate"),
        csi: gets("csi"),
        commid: gets("commid"),
        tts: geti("tts"),
        returned: geti("returned"),
        raw,
    }
}

#[cfg(test)]
#[path = "doneq_tests.rs"]
mod tests;
