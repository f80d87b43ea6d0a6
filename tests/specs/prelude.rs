//! Test helpers for black-box specifications of `kfaxd`.
//!
//! Every test here spawns the real compiled daemon binary against a
//! tempdir queue tree and a set of stub shell scripts standing in for
//! `sendfax`/`faxrm`/`faxstat`/`qpdf`/the report renderer/the header
//! script, then asserts on filesystem state. No test talks to a real
//! HylaFAX installation.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

pub const SPEC_POLL_INTERVAL_MS: u64 = 20;
pub const SPEC_WAIT_MAX_MS: u64 = 5_000;

/// Returns the path to a binary built as part of this workspace.
/// Falls back to resolving relative to the test binary itself when
/// `CARGO_MANIFEST_DIR` points at a stale or relocated checkout.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn kfaxd_binary() -> PathBuf {
    binary_path("kfaxd")
}

/// Poll a condition until it returns true or the timeout elapses.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll = Duration::from_millis(SPEC_POLL_INTERVAL_MS);
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll);
    }
    false
}

fn write_script(path: &Path, body: &str) {
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    std::os::unix::fs::PermissionsExt::set_mode(&mut perms, 0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

/// A tempdir standing in for the HylaFAX-adjacent tool belt: shell scripts
/// for `sendfax`, `faxrm`, `faxstat`, `qpdf`, the report renderer, and the
/// header tool, plus a `calls/` directory the scripts append markers to so
/// tests can assert a tool was (or wasn't) invoked without scraping logs.
pub struct StubTools {
    dir: tempfile::TempDir,
}

impl StubTools {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("calls")).unwrap();

        write_script(
            &dir.path().join("sendfax"),
            r#"
calls_dir="$(dirname "$0")/calls"
echo "$*" >> "$calls_dir/sendfax"
if [ -n "$STUB_SENDFAX_FAIL" ]; then
    echo "sendfax: transmission refused" >&2
    exit 1
fi
echo "request id is ${STUB_SENDFAX_JID:-4242}"
exit 0
"#,
        );

        write_script(
            &dir.path().join("faxrm"),
            r#"
calls_dir="$(dirname "$0")/calls"
echo "$*" >> "$calls_dir/faxrm"
exit 0
"#,
        );

        write_script(
            &dir.path().join("faxstat"),
            r#"
calls_dir="$(dirname "$0")/calls"
echo "$*" >> "$calls_dir/faxstat"
printf 'HylaFAX scheduler status\nJID PRI KILLTIME   OWNER    NUMBER        PAGES  DIALS   TTS STATUS\n'
"#,
        );

        write_script(
            &dir.path().join("qpdf"),
            r#"
calls_dir="$(dirname "$0")/calls"
echo "$*" >> "$calls_dir/qpdf"
out=""
for arg in "$@"; do
    out="$arg"
done
printf '%%PDF-1.4 stub merged\n' > "$out"
exit 0
"#,
        );

        write_script(
            &dir.path().join("kfax-report-renderer"),
            r#"
calls_dir="$(dirname "$0")/calls"
echo "$*" >> "$calls_dir/report-renderer"
prev=""
out=""
for arg in "$@"; do
    if [ "$prev" = "--out" ]; then
        out="$arg"
    fi
    prev="$arg"
done
printf '%%PDF-1.4 stub report\n' > "$out"
exit 0
"#,
        );

        write_script(
            &dir.path().join("header.sh"),
            r#"
calls_dir="$(dirname "$0")/calls"
echo "$*" >> "$calls_dir/header"
if [ -n "$STUB_HEADER_FAIL" ]; then
    exit 1
fi
cp "$1" "$2"
exit 0
"#,
        );

        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn bin(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    /// Lines recorded for a given tool, empty if it was never invoked.
    pub fn calls(&self, tool: &str) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls").join(tool))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn call_count(&self, tool: &str) -> usize {
        self.calls(tool).len()
    }
}

/// A running `kfaxd` instance over an isolated tempdir queue tree, with
/// the stub tool belt wired in through the `KFAX_*_BIN` environment
/// variables. Killed on drop.
pub struct Daemon {
    base: tempfile::TempDir,
    tools: StubTools,
    child: Child,
}

impl Daemon {
    /// Spawns `kfaxd` with fast polling/timeouts and the stub tool belt.
    /// `configure` can override or add environment variables before spawn
    /// (e.g. `KFAX_MAX_INFLIGHT_PROCESSING`).
    pub fn spawn(configure: impl FnOnce(&mut Command)) -> Self {
        let base = tempfile::tempdir().unwrap();
        let tools = StubTools::new();
        std::fs::create_dir_all(base.path().join("doneq")).unwrap();

        let mut cmd = Command::new(kfaxd_binary());
        cmd.env("KFAX_BASE", base.path())
            .env("KFAX_DONEQ_DIR", base.path().join("doneq"))
            .env("KFAX_SENDFAX_BIN", tools.bin("sendfax"))
            .env("KFAX_FAXRM_BIN", tools.bin("faxrm"))
            .env("KFAX_FAXSTAT_BIN", tools.bin("faxstat"))
            .env("KFAX_QPDF_BIN", tools.bin("qpdf"))
            .env("KFAX_REPORT_RENDERER_BIN", tools.bin("kfax-report-renderer"))
            .env("KFAX_HEADER_SCRIPT", tools.bin("header.sh"))
            .env("KFAX_POLL_INTERVAL_SEC", "0")
            .env("KFAX_CANCEL_POSTWAIT_SEC", "0")
            .env("KFAX_FAXSTAT_REFRESH_SEC", "0")
            .env("RUST_LOG", "info")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        configure(&mut cmd);

        let child = cmd.spawn().expect("kfaxd should spawn");
        Self { base, tools, child }
    }

    pub fn base(&self) -> &Path {
        self.base.path()
    }

    pub fn tools(&self) -> &StubTools {
        &self.tools
    }

    pub fn queue_dir(&self) -> PathBuf {
        self.base().join("queue")
    }

    pub fn processing_dir(&self) -> PathBuf {
        self.base().join("processing")
    }

    pub fn archive_ok_dir(&self) -> PathBuf {
        self.base().join("sendeberichte")
    }

    pub fn failure_out_dir(&self) -> PathBuf {
        self.base().join("sendefehler").join("berichte")
    }

    pub fn failure_in_dir(&self) -> PathBuf {
        self.base().join("sendefehler").join("eingang")
    }

    pub fn doneq_dir(&self) -> PathBuf {
        self.base().join("doneq")
    }

    /// Writes a `doneq/q<jid>` completion record.
    pub fn write_doneq(&self, jid: i64, statuscode: i64, extra: &str) {
        let path = self.doneq_dir().join(format!("q{jid}"));
        let mut f = std::fs::File::create(path).unwrap();
        writeln!(f, "statuscode: {statuscode}").unwrap();
        if !extra.is_empty() {
            writeln!(f, "{extra}").unwrap();
        }
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// A job directory ready to be dropped into `queue/` or `processing/`.
pub struct JobSpec {
    pub job_id: String,
    pub number: String,
    pub cancel_requested: bool,
}

impl JobSpec {
    pub fn new(job_id: &str, number: &str) -> Self {
        Self { job_id: job_id.to_string(), number: number.to_string(), cancel_requested: false }
    }

    pub fn cancelled(mut self) -> Self {
        self.cancel_requested = true;
        self
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "job_id": self.job_id,
            "recipient": { "number": self.number, "name": "Test Recipient" },
            "source": { "filename_original": format!("{}.pdf", self.job_id) },
            "cancel": { "requested": self.cancel_requested },
        })
    }

    /// Materialises this job under `parent` (`queue/` or `processing/`),
    /// writing a placeholder `doc.pdf` alongside `job.json`.
    pub fn create_under(&self, parent: &Path) -> PathBuf {
        let dir = parent.join(&self.job_id);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("job.json"), serde_json::to_vec_pretty(&self.json()).unwrap()).unwrap();
        std::fs::write(dir.join("doc.pdf"), b"%PDF-1.4 stub source\n").unwrap();
        dir
    }
}

/// Reads `job.json` out of a job directory as a generic JSON value.
pub fn read_job_json(job_dir: &Path) -> Option<serde_json::Value> {
    let text = std::fs::read_to_string(job_dir.join("job.json")).ok()?;
    serde_json::from_str(&text).ok()
}

/// Finds the one archived metadata JSON in `archive_dir` whose filename
/// contains `job_id`, if any.
pub fn find_archived_json(archive_dir: &Path, job_id: &str) -> Option<serde_json::Value> {
    let entries = std::fs::read_dir(archive_dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.contains(job_id) && name.ends_with(".json") {
            let text = std::fs::read_to_string(entry.path()).ok()?;
            return serde_json::from_str(&text).ok();
        }
    }
    None
}

pub fn archived_pdf_exists(archive_dir: &Path, job_id: &str, suffix: &str) -> bool {
    std::fs::read_dir(archive_dir)
        .map(|entries| {
            entries.flatten().any(|e| {
                let name = e.file_name();
                let name = name.to_string_lossy();
                name.contains(job_id) && name.ends_with(suffix)
            })
        })
        .unwrap_or(false)
}
