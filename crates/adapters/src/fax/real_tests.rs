// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::subprocess::FakeCommandRunner;
use kfax_core::Config;
use std::path::PathBuf;
use tempfile::tempdir;

fn test_config(doneq_dir: PathBuf) -> Config {
    let mut config = Config::load();
    config.doneq_dir = doneq_dir;
    config.fax_host = "localhost".to_string();
    config.fax_user = "faxworker".to_string();
    config
}

#[tokio::test]
async fn submit_parses_jid_and_overlays_faxuser() {
    let runner = FakeCommandRunner::new();
    runner.queue_success("sendfax", "request id is 7\n", "");
    let dir = tempdir().unwrap();
    let backend = RealFaxBackend::new(runner, &test_config(dir.path().to_path_buf()));

    let outcome = backend
        .submit("0049301234", Path::new("/tmp/doc.pdf"), Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(outcome.jid, Some(7));
    assert_eq!(outcome.rc, Some(0));
}

#[tokio::test]
async fn submit_without_parseable_jid_still_returns_forensics() {
    let runner = FakeCommandRunner::new();
    runner.queue_failure("sendfax", 1, "", "connection refused");
    let dir = tempdir().unwrap();
    let backend = RealFaxBackend::new(runner, &test_config(dir.path().to_path_buf()));

    let outcome = backend
        .submit("0049301234", Path::new("/tmp/doc.pdf"), Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(outcome.jid, None);
    assert_eq!(outcome.rc, Some(1));
    assert_eq!(outcome.stderr, "connection refused");
}

#[tokio::test]
async fn cancel_invokes_faxrm_with_jid_and_host() {
    let runner = FakeCommandRunner::new();
    runner.queue_success("faxrm", "", "");
    let dir = tempdir().unwrap();
    let backend = RealFaxBackend::new(runner, &test_config(dir.path().to_path_buf()));

    backend.cancel(9, Duration::from_secs(30)).await.unwrap();

    let calls = backend.runner.calls();
    assert_eq!(calls[0].program, "faxrm");
    assert_eq!(calls[0].args, vec!["-h".to_string(), "localhost".to_string(), "9".to_string()]);
    assert!(calls[0]
        .env_overlay
        .contains(&("FAXUSER".to_string(), "faxworker".to_string())));
}

#[tokio::test]
async fn faxstat_parses_successful_table() {
    let runner = FakeCommandRunner::new();
    runner.queue_success(
        "faxstat",
        "JID  Pri  S  Owner  Number  Pages Dials  TTS  Status\n7 1 R faxworker 0049 6:32 1:12 00:01 sending\n",
        "",
    );
    let dir = tempdir().unwrap();
    let backend = RealFaxBackend::new(runner, &test_config(dir.path().to_path_buf()));

    let rows = backend.faxstat(Duration::from_secs(10)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[&7].state, "R");
}

#[tokio::test]
async fn faxstat_nonzero_exit_is_an_error() {
    let runner = FakeCommandRunner::new();
    runner.queue_failure("faxstat", 1, "", "no route to host");
    let dir = tempdir().unwrap();
    let backend = RealFaxBackend::new(runner, &test_config(dir.path().to_path_buf()));

    assert!(backend.faxstat(Duration::from_secs(10)).await.is_err());
}

#[test]
fn read_doneq_parses_file_from_configured_directory() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("q7"), "statuscode: 0\nnpages: 2\n").unwrap();
    let backend = RealFaxBackend::new(FakeCommandRunner::new(), &test_config(dir.path().to_path_buf()));

    let record = backend.read_doneq(7).unwrap();
    assert_eq!(record.statuscode, Some(0));
    assert_eq!(record.npages, Some(2));
}

#[test]
fn read_doneq_missing_file_is_none() {
    let dir = tempdir().unwrap();
    let backend = RealFaxBackend::new(FakeCommandRunner::new(), &test_config(dir.path().to_path_buf()));
    assert!(backend.read_doneq(404).is_none());
}
