// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: subprocess execution, the fax backend
//! (`sendfax`/`faxrm`/`faxstat`/`doneq`), and the opaque report-renderer /
//! PDF-merge / header-prefix collaborators.

mod error;
pub mod fax;
pub mod pdf;
pub mod subprocess;

pub use error::AdapterError;
pub use fax::{FaxBackend, RealFaxBackend};
pub use pdf::{HeaderTool, PdfMerger, RealHeaderTool, RealPdfMerger, RealReportRenderer, ReportRenderer};
pub use subprocess::{CommandOutput, CommandRunner, CommandSpec, RealCommandRunner};

#[cfg(any(test, feature = "test-support"))]
pub use fax::FakeFaxBackend;
#[cfg(any(test, feature = "test-support"))]
pub use pdf::{FakeHeaderTool, FakePdfMerger, FakeReportRenderer};
#[cfg(any(test, feature = "test-support"))]
pub use subprocess::{FakeCommandRunner, RecordedCall};
