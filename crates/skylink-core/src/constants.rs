//! Simulation constants and tuning parameters.

use std::time::Duration;

/// Telemetry tick rate (Hz).
pub const TICK_RATE: u32 = 10;

/// Fixed period between telemetry ticks.
pub const TICK_PERIOD: Duration = Duration::from_millis(1000 / TICK_RATE as u64);

/// Longest physics step integrated in a single tick (seconds).
/// A stalled loop resumes with at most this much displacement.
pub const MAX_STEP_SECS: f64 = 1.0;

// --- Orbit ---

/// Orbit radius in degrees of latitude/longitude (~500 m).
pub const ORBIT_RADIUS_DEG: f64 = 0.005;

/// Angular rate around the orbit (rad/s).
pub const ORBIT_RATE: f64 = 0.5;

// --- Flight envelope ---

/// Cruise altitude while flying (meters).
pub const CRUISE_ALTITUDE_M: f64 = 120.0;

/// Floor of the cruise altitude random walk (meters).
pub const MIN_CRUISE_ALTITUDE_M: f64 = 10.0;

/// Half-width of the per-tick altitude noise band (meters).
pub const ALTITUDE_NOISE_M: f64 = 0.5;

/// Cruise speed while flying (km/h).
pub const CRUISE_SPEED_KMH: f64 = 60.0;

// --- Battery ---

/// Battery drain while flying (percent per second).
pub const DRAIN_RATE: f64 = 1.0;

/// Battery charge while landed (percent per second).
pub const CHARGE_RATE: f64 = 5.0;
