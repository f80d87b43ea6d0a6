// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The engine's external collaborators, bundled so every sweep function
//! takes one argument instead of five.

use kfax_adapters::{FaxBackend, HeaderTool, PdfMerger, ReportRenderer};
use kfax_core::{Clock, Config};

/// Everything a tick needs beyond the filesystem itself. Generic over the
/// concrete adapter types so tests can substitute fakes for all five
/// without trait-object indirection.
pub struct Deps<F, R, M, H, C> {
    pub config: Config,
    pub fax: F,
    pub report_renderer: R,
    pub pdf_merger: M,
    pub header_tool: H,
    pub clock: C,
}

impl<F, R, M, H, C> Deps<F, R, M, H, C>
where
    F: FaxBackend,
    R: ReportRenderer,
    M: PdfMerger,
    H: HeaderTool,
    C: Clock,
{
    pub fn new(config: Config, fax: F, report_renderer: R, pdf_merger: M, header_tool: H, clock: C) -> Self {
        Self { config, fax, report_renderer, pdf_merger, header_tool, clock }
    }
}
