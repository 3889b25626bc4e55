//! Logging setup for fscd.
//!
//! Diagnostics go to stderr by default. An operator can redirect them to
//! an append-mode file; if that file cannot be opened the daemon falls
//! back to stderr rather than dying, since logging is never worth a
//! missed verdict report.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Initialize logging, optionally appending to a file
pub fn init(logfile: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = logfile else {
        init_stderr(filter);
        return;
    };

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        Err(e) => {
            init_stderr(filter);
            warn!(
                "Failed to open log file {}: {}; falling back to stderr",
                path.display(),
                e
            );
        }
    }
}

fn init_stderr(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
