//! fscd - Firmware Sanity Checker daemon.
//!
//! Waits a bounded time for the update service to acknowledge this device
//! and reports the pass/fail verdict to the platform HAL, which controls
//! bank switching and rollback. Runs once per boot; the HAL report is the
//! only consequential side effect and the process always exits 0.

use clap::Parser;
use fscd::config::Config;
use fscd::daemon;
use fscd::hal::LoggingHal;
use fscd::logging;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fscd")]
#[command(about = "Firmware sanity checker - bounded wait for update-service acknowledgment", long_about = None)]
#[command(version)]
struct Cli {
    /// Append diagnostics to this file instead of stderr
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Read configuration from this file instead of the standard locations
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    logging::init(cli.logfile.as_deref());

    info!("Firmware sanity checker v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => Config::load_from_path(&path.to_string_lossy()).unwrap_or_else(|e| {
            warn!("Failed to load {}: {}; using defaults", path.display(), e);
            Config::default()
        }),
        None => Config::load(),
    };

    daemon::run(&config, &LoggingHal);

    // Exit code carries no signal; the HAL report above is the verdict.
}
