// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves which PDF on disk a job directory means by "the document" at
//! various points in its lifecycle.

use std::path::{Path, PathBuf};

/// The document to submit or to merge into a report: the header-prefixed
/// variant if the header tool produced one, otherwise the plain document.
pub fn variant_to_send(job_dir: &Path) -> PathBuf {
    let with_header = job_dir.join("doc_hdr.pdf");
    if with_header.exists() {
        with_header
    } else {
        job_dir.join("doc.pdf")
    }
}

/// The untouched original, for the re-ingestible copy dropped in
/// failure-eingang: `source.pdf` if the producer left one, else the same
/// `doc.pdf` that was (or would have been) submitted.
pub fn original_document(job_dir: &Path) -> PathBuf {
    let source = job_dir.join("source.pdf");
    if source.exists() {
        source
    } else {
        job_dir.join("doc.pdf")
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
