//! Enumeration types used throughout the simulator.

use serde::{Deserialize, Serialize};

/// Drone operating status, reported verbatim in every telemetry frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneStatus {
    /// On the ground awaiting a mission. Entered only at startup: once a
    /// mission launches the drone cycles between Flying and Recharging.
    #[default]
    Idle,
    /// Orbiting the mission center at cruise altitude.
    Flying,
    /// Landed with an empty battery, charging back to full.
    Recharging,
}
