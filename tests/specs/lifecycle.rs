//! End-to-end lifecycle scenarios (submit through archival), §8 scenarios
//! 1 and 2.

use crate::prelude::*;

#[test]
fn happy_path_submits_then_archives_as_success() {
    let daemon = Daemon::spawn(|cmd| {
        cmd.env("STUB_SENDFAX_JID", "9001");
    });

    JobSpec::new("job-happy", "5551234567").create_under(&daemon.queue_dir());

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || daemon.tools().call_count("sendfax") > 0),
        "sendfax should have been invoked"
    );

    daemon.write_doneq(9001, 0, "npages: 2\ntotpages: 2\nsignalrate: 14400");

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || archived_pdf_exists(&daemon.archive_ok_dir(), "job-happy", "__OK.pdf")),
        "job should be archived as success"
    );

    assert!(!daemon.queue_dir().join("job-happy").exists());
    assert!(!daemon.processing_dir().join("job-happy").exists());

    let meta = find_archived_json(&daemon.archive_ok_dir(), "job-happy").expect("archived metadata");
    assert_eq!(meta["status"], "OK");
    assert_eq!(meta["hylafax"]["jid"], 9001);
    assert_eq!(meta["result"]["statuscode"], 0);
    assert_eq!(meta["result"]["npages"], 2);

    assert_eq!(daemon.tools().call_count("report-renderer"), 1);
    assert_eq!(daemon.tools().call_count("qpdf"), 1);
}

#[test]
fn backend_submit_failure_leaves_the_job_for_an_operator() {
    let daemon = Daemon::spawn(|cmd| {
        cmd.env("STUB_SENDFAX_FAIL", "1");
    });

    JobSpec::new("job-refused", "5559876543").create_under(&daemon.queue_dir());

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || {
            let job_dir = daemon.processing_dir().join("job-refused");
            read_job_json(&job_dir).map(|j| j["status"] == "FAILED").unwrap_or(false)
        }),
        "job should land in processing/ marked FAILED after sendfax refuses"
    );

    assert!(daemon.processing_dir().join("job-refused").exists(), "job must stay put, not vanish");
    let job = read_job_json(&daemon.processing_dir().join("job-refused")).unwrap();
    assert_eq!(job["hylafax"]["jid"], serde_json::Value::Null);
    assert_eq!(job["hylafax"]["sendfax_rc"], 1);

    // No jid means finalize never has a doneq record to look for: the job
    // should never reach either archive.
    std::thread::sleep(std::time::Duration::from_millis(200));
    assert!(!archived_pdf_exists(&daemon.failure_out_dir(), "job-refused", ".pdf"));
    assert!(!archived_pdf_exists(&daemon.archive_ok_dir(), "job-refused", ".pdf"));
}

#[test]
fn header_tool_failure_falls_back_to_the_plain_document() {
    let daemon = Daemon::spawn(|cmd| {
        cmd.env("STUB_SENDFAX_JID", "9100").env("STUB_HEADER_FAIL", "1");
    });

    JobSpec::new("job-no-header", "5551112222").create_under(&daemon.queue_dir());

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || daemon.tools().call_count("sendfax") > 0),
        "sendfax should still run even though the header tool failed"
    );

    daemon.write_doneq(9100, 0, "");

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || archived_pdf_exists(&daemon.archive_ok_dir(), "job-no-header", "__OK.pdf")),
        "job should still archive successfully without a header variant"
    );

    assert!(daemon.tools().call_count("header") > 0);
}
