//! Telemetry snapshot: the drone state serialized to the client each tick.

use serde::{Deserialize, Serialize};

use crate::enums::DroneStatus;

/// One frame of drone telemetry.
///
/// Coordinates stay at zero until the first tick after a mission starts.
/// Altitude and speed carry two decimals, battery one, so frames are
/// display-ready without client-side formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: f64,
    pub battery_level: f64,
    pub status: DroneStatus,
}

/// Round a value to `decimals` places for wire output.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
