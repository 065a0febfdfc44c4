//! Simulation engine for SKYLINK.
//!
//! Owns the drone state machine, integrates physics by elapsed wall-clock
//! time, and produces TelemetrySnapshots for the stream loop.

pub mod drone;

pub use drone::{DroneSimulation, SimConfig};
pub use skylink_core as core;
