//! Scheduler fairness scenarios, §8 scenarios 5 and 6: per-number mutual
//! exclusion and the inflight concurrency cap.

use crate::prelude::*;

#[test]
fn per_number_exclusion_keeps_the_second_job_queued_until_the_first_frees_up() {
    let daemon = Daemon::spawn(|cmd| {
        cmd.env("STUB_SENDFAX_JID", "5001");
    });

    // Same recipient number in two different formats; the scheduler must
    // still recognise them as the same busy number (normalized_number).
    JobSpec::new("job-a", "(555) 444-3333").create_under(&daemon.queue_dir());
    JobSpec::new("job-b", "5554443333").create_under(&daemon.queue_dir());

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || daemon.processing_dir().join("job-a").exists()),
        "job-a should be claimed first (directory order)"
    );

    // job-b must not be claimed while job-a's number is busy.
    std::thread::sleep(std::time::Duration::from_millis(200));
    assert!(daemon.queue_dir().join("job-b").exists(), "job-b must stay queued behind the busy number");
    assert!(!daemon.processing_dir().join("job-b").exists());

    daemon.write_doneq(5001, 0, "");

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || archived_pdf_exists(&daemon.archive_ok_dir(), "job-a", "__OK.pdf")),
        "job-a should finalize, freeing its recipient number"
    );

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || daemon.processing_dir().join("job-b").exists()
            || daemon.tools().call_count("sendfax") >= 2),
        "job-b should be claimed once job-a's number is no longer busy"
    );
}

#[test]
fn inflight_cap_limits_concurrent_processing_jobs() {
    let daemon = Daemon::spawn(|cmd| {
        cmd.env("STUB_SENDFAX_JID", "6001").env("KFAX_MAX_INFLIGHT_PROCESSING", "1");
    });

    JobSpec::new("job-first", "5551000000").create_under(&daemon.queue_dir());
    JobSpec::new("job-second", "5552000000").create_under(&daemon.queue_dir());

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || {
            let job_dir = daemon.processing_dir().join("job-first");
            read_job_json(&job_dir).map(|j| j["hylafax"]["jid"] == 6001).unwrap_or(false)
        }),
        "job-first should be submitted"
    );

    // With the cap at 1, job-second must not be claimed while job-first
    // still counts as inflight (status submitted/running).
    std::thread::sleep(std::time::Duration::from_millis(200));
    assert!(
        daemon.queue_dir().join("job-second").exists(),
        "job-second must wait in queue/ while the inflight cap is saturated"
    );

    daemon.write_doneq(6001, 0, "");

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || archived_pdf_exists(&daemon.archive_ok_dir(), "job-first", "__OK.pdf")),
        "job-first should finalize, freeing an inflight slot"
    );

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || !daemon.queue_dir().join("job-second").exists()),
        "job-second should now be claimed"
    );
}
