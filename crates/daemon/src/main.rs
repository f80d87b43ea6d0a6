// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kfaxd`: supervisor daemon for queued fax transmissions.
//!
//! Usage: `kfaxd` — no CLI surface beyond "run as daemon" (§6). All
//! configuration is environment-driven; see `kfax_core::Config`.

mod logging;

use kfax_core::Config;
use tracing::error;

#[tokio::main]
async fn main() {
    let _log_guard = logging::init();
    let config = Config::load();

    let (mut tick, _lock) = match kfax_daemon::startup(config.clone()) {
        Ok(ready) => ready,
        Err(err) => {
            eprintln!("kfaxd: {err}");
            error!(error = %err, "startup failed");
            std::process::exit(err.exit_code());
        }
    };

    tracing::info!(base = %config.base.display(), "kfaxd starting");

    if let Err(err) = kfax_daemon::run_loop(&mut tick, config.poll_interval).await {
        eprintln!("kfaxd: {err}");
        error!(error = %err, "run loop failed");
        std::process::exit(err.exit_code());
    }
}
