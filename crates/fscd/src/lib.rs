//! Firmware sanity checker library - exposes modules for testing.

pub mod config;
pub mod daemon;
pub mod error;
pub mod hal;
pub mod logging;
pub mod monitor;
pub mod probe;
pub mod response;
