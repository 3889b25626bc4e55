//! Platform HAL linkage - image validity marking and bank-switch timeout.
//!
//! The real implementations live in the vendor platform library and control
//! whether the bootloader keeps or rolls back the running image. From this
//! daemon's standpoint they are opaque calls with device-bricking
//! potential: the validity report must be reached on every code path, and
//! any failure from the HAL itself is logged and absorbed.

use crate::error::FscError;
use std::sync::Mutex;
use tracing::info;

pub trait PlatformHal {
    /// Tell the platform how long it should wait for a validity verdict
    /// before rolling back on its own
    fn set_device_code_image_timeout(&self, seconds: u64) -> Result<(), FscError>;

    /// Mark the running image valid or invalid. Called exactly once per run.
    fn set_device_code_image_valid(&self, valid: bool) -> Result<(), FscError>;
}

/// Stand-in used when no vendor library is linked; logs the calls so
/// bench-unit bring-up is observable.
#[derive(Debug, Default)]
pub struct LoggingHal;

impl PlatformHal for LoggingHal {
    fn set_device_code_image_timeout(&self, seconds: u64) -> Result<(), FscError> {
        info!("HAL: device code image timeout set to {}s", seconds);
        Ok(())
    }

    fn set_device_code_image_valid(&self, valid: bool) -> Result<(), FscError> {
        info!("HAL: device code image valid = {}", valid);
        Ok(())
    }
}

/// Records every HAL call, for tests that assert call counts and values.
#[derive(Debug, Default)]
pub struct RecordingHal {
    pub timeouts: Mutex<Vec<u64>>,
    pub verdicts: Mutex<Vec<bool>>,
}

impl PlatformHal for RecordingHal {
    fn set_device_code_image_timeout(&self, seconds: u64) -> Result<(), FscError> {
        self.timeouts.lock().unwrap().push(seconds);
        Ok(())
    }

    fn set_device_code_image_valid(&self, valid: bool) -> Result<(), FscError> {
        self.verdicts.lock().unwrap().push(valid);
        Ok(())
    }
}
