// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Env-var driven configuration, mirroring the constants the original
//! Python module hardcoded at the top of the file.

use std::path::PathBuf;
use std::time::Duration;

/// Root of the job-directory queue tree and all derived paths, plus the
/// tunable knobs from §5/§6 of the specification.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory; defaults to `/srv/kienzlefax`, overridable via
    /// `KFAX_BASE` so integration tests can point the daemon at a tempdir.
    pub base: PathBuf,
    /// Directory HylaFAX writes completion records into.
    pub doneq_dir: PathBuf,
    /// Optional external header-prefix script.
    pub header_script: PathBuf,
    /// `qpdf` binary name/path.
    pub qpdf_bin: String,
    /// `sendfax` binary name/path.
    pub sendfax_bin: String,
    /// `faxrm` binary name/path.
    pub faxrm_bin: String,
    /// `faxstat` binary name/path.
    pub faxstat_bin: String,
    /// External report-renderer collaborator binary.
    pub report_renderer_bin: String,

    pub fax_host: String,
    pub fax_user: String,

    pub max_inflight_processing: usize,
    pub poll_interval: Duration,
    pub faxstat_refresh_interval: Duration,
    pub finalize_timeout: Duration,
    pub send_timeout: Duration,
    pub faxrm_timeout: Duration,
    pub faxstat_timeout: Duration,
    pub header_timeout: Duration,
    pub cancel_postwait: Duration,
    /// Budget for the report-renderer and PDF-merge collaborators during
    /// finalization. Not named explicitly in the specification; sized the
    /// same as `header_timeout` since all three are opaque subprocess
    /// collaborators of comparable weight.
    pub report_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment, falling back to the
    /// defaults named in the specification.
    pub fn load() -> Self {
        let base = env_path("KFAX_BASE").unwrap_or_else(|| PathBuf::from("/srv/kienzlefax"));
        let doneq_dir = env_path("KFAX_DONEQ_DIR")
            .unwrap_or_else(|| PathBuf::from("/var/spool/hylafax/doneq"));
        let header_script = env_path("KFAX_HEADER_SCRIPT")
            .unwrap_or_else(|| PathBuf::from("/usr/local/bin/pdf_with_header.sh"));

        Self {
            base,
            doneq_dir,
            header_script,
            qpdf_bin: env_string("KFAX_QPDF_BIN").unwrap_or_else(|| "qpdf".to_string()),
            sendfax_bin: env_string("KFAX_SENDFAX_BIN").unwrap_or_else(|| "sendfax".to_string()),
            faxrm_bin: env_string("KFAX_FAXRM_BIN").unwrap_or_else(|| "faxrm".to_string()),
            faxstat_bin: env_string("KFAX_FAXSTAT_BIN").unwrap_or_else(|| "faxstat".to_string()),
            report_renderer_bin: env_string("KFAX_REPORT_RENDERER_BIN")
                .unwrap_or_else(|| "kfax-report-renderer".to_string()),
            fax_host: env_string("KFAX_FAX_HOST").unwrap_or_else(|| "localhost".to_string()),
            fax_user: env_string("KFAX_FAXUSER").unwrap_or_else(|| "faxworker".to_string()),
            max_inflight_processing: env_u64("KFAX_MAX_INFLIGHT_PROCESSING").unwrap_or(2) as usize,
            poll_interval: env_secs("KFAX_POLL_INTERVAL_SEC").unwrap_or(Duration::from_secs(1)),
            faxstat_refresh_interval: env_secs("KFAX_FAXSTAT_REFRESH_SEC")
                .unwrap_or(Duration::from_secs(2)),
            finalize_timeout: env_secs("KFAX_FINALIZE_TIMEOUT_SEC")
                .unwrap_or(Duration::from_secs(60 * 30)),
            send_timeout: env_secs("KFAX_SEND_TIMEOUT_SEC").unwrap_or(Duration::from_secs(30)),
            faxrm_timeout: env_secs("KFAX_FAXRM_TIMEOUT_SEC").unwrap_or(Duration::from_secs(30)),
            faxstat_timeout: env_secs("KFAX_FAXSTAT_TIMEOUT_SEC").unwrap_or(Duration::from_secs(10)),
            header_timeout: env_secs("KFAX_HEADER_TIMEOUT_SEC").unwrap_or(Duration::from_secs(60)),
            cancel_postwait: env_secs("KFAX_CANCEL_POSTWAIT_SEC").unwrap_or(Duration::from_secs(3)),
            report_timeout: env_secs("KFAX_REPORT_TIMEOUT_SEC").unwrap_or(Duration::from_secs(60)),
        }
    }

    pub fn queue_dir(&self) -> PathBuf {
        self.base.join("queue")
    }

    pub fn processing_dir(&self) -> PathBuf {
        self.base.join("processing")
    }

    pub fn archive_ok_dir(&self) -> PathBuf {
        self.base.join("sendeberichte")
    }

    pub fn failure_in_dir(&self) -> PathBuf {
        self.base.join("sendefehler").join("eingang")
    }

    pub fn failure_out_dir(&self) -> PathBuf {
        self.base.join("sendefehler").join("berichte")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.base.join(".kienzlefax-worker.lock")
    }

    pub fn all_managed_dirs(&self) -> [PathBuf; 5] {
        [
            self.queue_dir(),
            self.processing_dir(),
            self.archive_ok_dir(),
            self.failure_in_dir(),
            self.failure_out_dir(),
        ]
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key).ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.parse().ok()
}

fn env_secs(key: &str) -> Option<Duration> {
    env_u64(key).map(Duration::from_secs)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
