//! WCV CLI - Command line tools for well-clear violation detection.
//!
//! This crate provides:
//! - wcv_detect: run a detector over a JSON encounter scenario

pub mod config;
pub mod scenario;

pub use config::Config;
pub use scenario::{run, AircraftState, DetectionReport, Scenario, VelocityInput};
