//! Client commands received over the telemetry connection.
//!
//! Commands are applied before the tick that follows them, so a command
//! is always reflected in the next snapshot the client sees.

use serde::{Deserialize, Serialize};

/// All client actions this build understands.
///
/// The `action` field selects the variant. Actions from newer clients
/// deserialize to `Unknown` and are ignored rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ControlCommand {
    /// Start (or restart) a mission orbiting the given coordinates.
    #[serde(rename = "LAUNCH")]
    Launch { lat: f64, lon: f64 },
    /// Any action not recognized by this build.
    #[serde(other)]
    Unknown,
}
