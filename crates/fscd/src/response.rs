//! Response poller - update-service acknowledgment artifact.
//!
//! The update service drops a JSON response file once it has recognized
//! this device. A missing file is the expected state until the service
//! replies, so it is logged at warn level, never as an error.

use crate::error::FscError;
use serde_json::Value;
use std::fs;
use tracing::{info, warn};

/// Key the update service fills in with the firmware it expects us to run
const FIRMWARE_FILENAME_KEY: &str = "firmwareFilename";

/// Check whether the update service has answered with a usable firmware
/// name. Re-evaluated on every poll tick, no caching.
pub fn has_valid_response(path: &str) -> bool {
    if !crate::probe::file_exists(path) {
        warn!(
            "Response file {} does not exist yet, update service has not responded",
            path
        );
        return false;
    }

    match read_firmware_filename(path) {
        Ok(Some(name)) => {
            info!("Update service reported a firmware name of {}", name);
            true
        }
        Ok(None) => {
            warn!("Response exists, but did not contain a valid firmware image name");
            false
        }
        Err(e) => {
            warn!("Failed to parse response file {}: {}", path, e);
            false
        }
    }
}

/// Extract a non-empty firmware filename from the response artifact
fn read_firmware_filename(path: &str) -> Result<Option<String>, FscError> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(value
        .get(FIRMWARE_FILENAME_KEY)
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string))
}
