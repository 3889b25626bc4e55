//! Decision state machine - bounded wait for a valid update-service answer.
//!
//! A single blocking loop: sleep, poll, decide. The verdict is one-shot;
//! once the loop leaves the waiting state it never re-evaluates.

use crate::config::MonitorConfig;
use crate::probe::Flags;
use std::thread;
use std::time::Instant;
use tracing::info;

/// Terminal outcome of the monitor loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    TimedOut,
}

impl Verdict {
    /// Boolean reported to the HAL
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// Transition rule, evaluated once per poll tick.
///
/// Production images and debug-overridden images need a valid response;
/// non-production, non-overridden builds are valid without waiting.
pub fn verdict_ready(flags: Flags, response_valid: bool) -> bool {
    (flags.debug_override && response_valid)
        || (flags.is_production && response_valid)
        || (!flags.debug_override && !flags.is_production)
}

/// Run the bounded poll loop to a terminal verdict.
///
/// `poll` is re-evaluated every tick with no caching. The loop gives up
/// once the elapsed time reaches the deadline (timeout minus the safety
/// margin), leaving the HAL room to act before its own watchdog fires.
pub fn run<F>(config: &MonitorConfig, flags: Flags, mut poll: F) -> Verdict
where
    F: FnMut() -> bool,
{
    // Nothing to wait for on a non-production, non-overridden build.
    if verdict_ready(flags, false) {
        return Verdict::Valid;
    }

    info!("Starting firmware sanity check loop...");
    let start = Instant::now();

    loop {
        thread::sleep(config.sample_interval());

        if verdict_ready(flags, poll()) {
            return Verdict::Valid;
        }

        if start.elapsed() >= config.deadline() {
            info!("Time expired waiting for a valid update-service response");
            return Verdict::TimedOut;
        }
    }
}
