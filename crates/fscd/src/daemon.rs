//! Daemon control flow: probe, bounded wait, verdict report.

use crate::config::Config;
use crate::hal::PlatformHal;
use crate::monitor::{self, Verdict};
use crate::probe::Flags;
use crate::response;
use tracing::{error, info};

/// Run one full sanity-check cycle and report the verdict to the HAL.
///
/// The validity report is this process's only externally consequential
/// side effect, so it is reached on every path, including probe failures.
/// HAL errors themselves are logged and absorbed.
pub fn run(config: &Config, hal: &dyn PlatformHal) -> Verdict {
    // Tell the HAL the expiry it should also enforce independently.
    if let Err(e) = hal.set_device_code_image_timeout(config.monitor.timeout_secs) {
        error!("Failed to report image timeout to HAL: {}", e);
    }

    let flags = Flags::detect(config);

    let verdict = monitor::run(&config.monitor, flags, || {
        response::has_valid_response(&config.paths.response)
    });

    if let Err(e) = hal.set_device_code_image_valid(verdict.is_valid()) {
        error!("Failed to report image validity to HAL: {}", e);
    }

    info!(
        "Firmware sanity checker exit with valid image: {}",
        verdict.is_valid()
    );

    verdict
}
