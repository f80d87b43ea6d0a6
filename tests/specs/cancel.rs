//! Cancel Subsystem scenarios, §8 scenarios 3 and 4.

use crate::prelude::*;

#[test]
fn queue_cancel_short_circuits_a_job_that_never_ran() {
    let daemon = Daemon::spawn(|cmd| {
        cmd.env("STUB_SENDFAX_JID", "1234");
    });

    JobSpec::new("job-queue-cancel", "5550001111").cancelled().create_under(&daemon.queue_dir());

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || archived_pdf_exists(
            &daemon.failure_out_dir(),
            "job-queue-cancel",
            "__FAILED.pdf"
        )),
        "a cancelled queue job should archive straight to the failure tree"
    );

    assert!(!daemon.queue_dir().join("job-queue-cancel").exists());
    assert_eq!(daemon.tools().call_count("sendfax"), 0, "a job cancelled before claim must never call sendfax");

    let meta = find_archived_json(&daemon.failure_out_dir(), "job-queue-cancel").expect("archived metadata");
    assert_eq!(meta["status"], "FAILED");
    assert_eq!(meta["result"]["reason"], "cancelled");
    assert!(meta["cancel"]["handled_at"].is_string());
}

#[test]
fn inflight_cancel_invokes_faxrm_then_finalizes_as_cancelled() {
    let daemon = Daemon::spawn(|cmd| {
        cmd.env("STUB_SENDFAX_JID", "7777");
    });

    JobSpec::new("job-inflight-cancel", "5552223333").create_under(&daemon.queue_dir());

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || {
            let job_dir = daemon.processing_dir().join("job-inflight-cancel");
            read_job_json(&job_dir).map(|j| j["hylafax"]["jid"] == 7777).unwrap_or(false)
        }),
        "job should be submitted and have a jid before cancel is requested"
    );

    let job_dir = daemon.processing_dir().join("job-inflight-cancel");
    let mut job = read_job_json(&job_dir).unwrap();
    job["cancel"]["requested"] = serde_json::Value::Bool(true);
    std::fs::write(job_dir.join("job.json"), serde_json::to_vec_pretty(&job).unwrap()).unwrap();

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || daemon.tools().call_count("faxrm") > 0),
        "faxrm should be invoked against the in-flight job"
    );
    assert!(daemon.tools().calls("faxrm")[0].contains("7777"));

    // The backend's completion record eventually lands even for a
    // cancelled job (HylaFAX reports the abort as a non-zero statuscode).
    daemon.write_doneq(7777, 1, "");

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || archived_pdf_exists(
            &daemon.failure_out_dir(),
            "job-inflight-cancel",
            "__FAILED.pdf"
        )),
        "job should finalize to the failure archive once its completion record appears"
    );

    let meta = find_archived_json(&daemon.failure_out_dir(), "job-inflight-cancel").expect("archived metadata");
    assert_eq!(meta["result"]["reason"], "cancelled");
    // Failure path always drops a re-ingestible copy of the original.
    assert!(archived_pdf_exists(&daemon.failure_in_dir(), "job-inflight-cancel", ".pdf"));
}
