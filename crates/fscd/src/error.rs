//! Error types for fscd.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FscError {
    #[error("HAL call failed: {0}")]
    Hal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
