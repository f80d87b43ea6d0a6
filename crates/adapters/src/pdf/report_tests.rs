// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;
use std::time::Duration;

use super::*;
use crate::subprocess::FakeCommandRunner;

#[tokio::test]
async fn omits_doneq_flag_when_none() {
    let runner = FakeCommandRunner::new();
    runner.queue_success("kfax-report-renderer", "", "");
    let renderer = RealReportRenderer::new(runner, "kfax-report-renderer");

    renderer
        .render(Path::new("/tmp/job.json"), None, Path::new("/tmp/report.pdf"), Duration::from_secs(60))
        .await
        .unwrap();

    let calls = renderer.runner.calls();
    assert_eq!(
        calls[0].args,
        vec![
            "--job".to_string(),
            "/tmp/job.json".to_string(),
            "--out".to_string(),
            "/tmp/report.pdf".to_string(),
        ]
    );
}

#[tokio::test]
async fn includes_doneq_flag_when_present() {
    let runner = FakeCommandRunner::new();
    runner.queue_success("kfax-report-renderer", "", "");
    let renderer = RealReportRenderer::new(runner, "kfax-report-renderer");

    renderer
        .render(
            Path::new("/tmp/job.json"),
            Some(Path::new("/var/spool/hylafax/doneq/q7")),
            Path::new("/tmp/report.pdf"),
            Duration::from_secs(60),
        )
        .await
        .unwrap();

    let calls = renderer.runner.calls();
    assert_eq!(
        calls[0].args,
        vec![
            "--job".to_string(),
            "/tmp/job.json".to_string(),
            "--doneq".to_string(),
            "/var/spool/hylafax/doneq/q7".to_string(),
            "--out".to_string(),
            "/tmp/report.pdf".to_string(),
        ]
    );
}

#[tokio::test]
async fn nonzero_exit_is_an_error() {
    let runner = FakeCommandRunner::new();
    runner.queue_failure("kfax-report-renderer", 1, "", "template missing");
    let renderer = RealReportRenderer::new(runner, "kfax-report-renderer");

    let result = renderer
        .render(Path::new("/tmp/job.json"), None, Path::new("/tmp/report.pdf"), Duration::from_secs(60))
        .await;

    assert!(result.is_err());
}
