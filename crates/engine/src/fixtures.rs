// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test fixtures: a fully-faked [`Deps`] and a helper for seeding a
//! job directory on disk. Used by every sweep's test module.

#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use kfax_adapters::{FakeFaxBackend, FakeHeaderTool, FakePdfMerger, FakeReportRenderer};
use kfax_core::{Config, FakeClock, Job};

use crate::deps::Deps;

pub type TestDeps = Deps<FakeFaxBackend, FakeReportRenderer, FakePdfMerger, FakeHeaderTool, FakeClock>;

pub fn test_config(base: PathBuf) -> Config {
    Config { base, ..Config::load() }
}

pub fn test_deps(base: PathBuf, now: DateTime<Utc>) -> TestDeps {
    Deps::new(
        test_config(base),
        FakeFaxBackend::new(),
        FakeReportRenderer::new(),
        FakePdfMerger::new(),
        FakeHeaderTool::new(),
        FakeClock::new(now),
    )
}

/// Writes `job.json` (and, if given, a `doc.pdf` placeholder) into `dir`,
/// creating the directory if needed.
pub fn seed_job_dir(dir: &Path, job: &Job, with_document: bool) {
    std::fs::create_dir_all(dir).unwrap();
    kfax_store::write_job(dir, job).unwrap();
    if with_document {
        std::fs::write(dir.join("doc.pdf"), b"%PDF-1.4 test document\n").unwrap();
    }
}
