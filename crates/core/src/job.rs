// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Job` record: the canonical projection of a job directory's
//! `job.json`, plus the open map of fields the supervisor doesn't know
//! about but must round-trip untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle status, monotonic within a job's life except at the
/// claim/submit boundary (see the state machine in the engine crate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "claimed")]
    Claimed,
    #[serde(rename = "submitted")]
    Submitted,
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAILED")]
    Failed,
}

impl Status {
    /// `submitted` and `running` are treated as equivalent for inflight
    /// accounting (source never explicitly assigns `running`; see
    /// open question in the scheduler design).
    pub fn counts_as_inflight(self) -> bool {
        matches!(self, Status::Submitted | Status::Running)
    }

    /// `claimed`, `submitted`, `running` occupy a recipient number for
    /// the purposes of per-number mutual exclusion.
    pub fn is_busy(self) -> bool {
        matches!(self, Status::Claimed | Status::Submitted | Status::Running)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_original: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecm: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HylafaxState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sendfax_rc: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sendfax_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sendfax_err: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelState {
    #[serde(default)]
    pub requested: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled_at: Option<DateTime<Utc>>,
}

impl CancelState {
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    pub fn is_handled(&self) -> bool {
        self.handled_at.is_some()
    }
}

/// Fields populated from the backend completion record (`doneq/q<JID>`).
///
/// `signalrate`/`csi`/`commid` default to empty strings (not null) when the
/// record doesn't supply them, matching the source; `statuscode`/`npages`/
/// `totpages` are genuinely nullable. `tx_time` is declared but never
/// populated by the backend — carried for archive-consumer schema
/// compatibility only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoneqResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuscode: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npages: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totpages: Option<i64>,
    #[serde(default)]
    pub signalrate: String,
    #[serde(default)]
    pub csi: String,
    #[serde(default)]
    pub commid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveProgress {
    pub sent: i64,
    pub total: i64,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveDials {
    pub done: i64,
    pub max: i64,
    pub raw: String,
}

/// Best-effort projection of the `faxstat -sal` table row. Last-known-good,
/// not ground truth: a jid missing from a given poll leaves these fields
/// untouched rather than clearing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<LiveProgress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dials: Option<LiveDials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faxstat_status: Option<String>,
}

/// The canonical projection of a job directory's `job.json`.
///
/// Modeled as a struct of known fields plus a flattened `extra` map so that
/// fields the supervisor doesn't recognise (written by a producer, or by a
/// future version of this daemon) survive a read-modify-write untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_default_recipient")]
    pub recipient: Recipient,
    #[serde(default, skip_serializing_if = "is_default_source")]
    pub source: Source,
    #[serde(default, skip_serializing_if = "is_default_options")]
    pub options: Options,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "is_default_hylafax")]
    pub hylafax: HylafaxState,
    #[serde(default, skip_serializing_if = "is_default_cancel")]
    pub cancel: CancelState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalizing_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<DoneqResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<LiveState>,
    /// Fields this supervisor doesn't model. Round-tripped untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_default_recipient(r: &Recipient) -> bool {
    r == &Recipient::default()
}
fn is_default_source(s: &Source) -> bool {
    s == &Source::default()
}
fn is_default_options(o: &Options) -> bool {
    o == &Options::default()
}
fn is_default_hylafax(h: &HylafaxState) -> bool {
    h == &HylafaxState::default()
}
fn is_default_cancel(c: &CancelState) -> bool {
    c == &CancelState::default()
}

impl Job {
    /// The job id to use when `job_id` is absent from the metadata: the
    /// job directory name, which is always authoritative.
    pub fn id_or(&self, dir_name: &str) -> String {
        self.job_id.clone().unwrap_or_else(|| dir_name.to_string())
    }

    pub fn normalized_number(&self) -> String {
        crate::normalize::normalize_number(self.recipient.number.as_deref().unwrap_or(""))
    }

    pub fn cancel_requested(&self) -> bool {
        self.cancel.is_requested()
    }

    pub fn cancel_handled(&self) -> bool {
        self.cancel.is_handled()
    }

    pub fn mark_cancel_handled(&mut self, now: DateTime<Utc>) {
        self.cancel.handled_at.get_or_insert(now);
    }

    pub fn result_mut(&mut self) -> &mut DoneqResult {
        self.result.get_or_insert_with(DoneqResult::default)
    }
}

/// Assigns `value` into `slot` only if `slot` is currently `None`
/// ("set-if-absent"): the discipline every lifecycle timestamp follows so
/// that replays and re-reads never move a timestamp backwards or forwards.
pub fn set_if_absent<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
