//! Drone simulation engine.
//!
//! `DroneSimulation` owns the drone's physical and energy state and
//! exposes `start_mission` and `tick` as its only mutators. Completely
//! headless (no transport dependency), enabling deterministic testing.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skylink_core::constants::{
    ALTITUDE_NOISE_M, CHARGE_RATE, CRUISE_ALTITUDE_M, CRUISE_SPEED_KMH, DRAIN_RATE, MAX_STEP_SECS,
    MIN_CRUISE_ALTITUDE_M, ORBIT_RADIUS_DEG, ORBIT_RATE,
};
use skylink_core::enums::DroneStatus;
use skylink_core::telemetry::{round_to, TelemetrySnapshot};

/// Configuration for a new simulation.
pub struct SimConfig {
    /// RNG seed for the altitude noise. Same seed = same flight.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The drone state machine. One instance per connection, mutated only by
/// the owning stream loop.
pub struct DroneSimulation {
    status: DroneStatus,
    center_lat: f64,
    center_lon: f64,
    /// Orbit angle in radians. Advances only while flying and survives
    /// mission restarts.
    angle: f64,
    /// None until the first tick after a mission starts.
    position: Option<(f64, f64)>,
    altitude: f64,
    speed: f64,
    battery: f64,
    last_update: Instant,
    rng: ChaCha8Rng,
}

impl DroneSimulation {
    /// Create a new simulation in the idle state.
    pub fn new(config: SimConfig) -> Self {
        Self {
            status: DroneStatus::Idle,
            center_lat: 0.0,
            center_lon: 0.0,
            angle: 0.0,
            position: None,
            altitude: 0.0,
            speed: 0.0,
            battery: 100.0,
            last_update: Instant::now(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    /// Start (or restart) a mission centered on the given coordinates.
    ///
    /// Unconditionally resets to the canonical flying state: full battery,
    /// cruise altitude and speed. May be called at any time, including
    /// mid-flight or mid-recharge. Non-finite coordinates are ignored
    /// (JSON cannot carry them; this guards direct API misuse).
    pub fn start_mission(&mut self, lat: f64, lon: f64, now: Instant) {
        if !lat.is_finite() || !lon.is_finite() {
            return;
        }
        self.center_lat = lat;
        self.center_lon = lon;
        self.status = DroneStatus::Flying;
        self.battery = 100.0;
        self.altitude = CRUISE_ALTITUDE_M;
        self.speed = CRUISE_SPEED_KMH;
        self.last_update = now;
    }

    /// Advance the simulation to `now` and return the resulting snapshot.
    ///
    /// The integrated interval is clamped to `MAX_STEP_SECS` so a stalled
    /// loop cannot produce a single catastrophic jump on resume. Idle is a
    /// no-op: `start_mission` re-arms the clock when a mission begins.
    pub fn tick(&mut self, now: Instant) -> TelemetrySnapshot {
        if self.status != DroneStatus::Idle {
            let elapsed = now
                .saturating_duration_since(self.last_update)
                .as_secs_f64()
                .min(MAX_STEP_SECS);
            self.last_update = now;
            self.advance(elapsed);
        }
        self.snapshot()
    }

    /// Integrate an exact elapsed interval in seconds.
    ///
    /// `tick` derives the interval from wall-clock time; tests call this
    /// directly for precise control over integration steps.
    pub fn advance(&mut self, elapsed: f64) {
        match self.status {
            DroneStatus::Idle => {}
            DroneStatus::Flying => self.fly(elapsed),
            DroneStatus::Recharging => self.recharge(elapsed),
        }
    }

    /// Build the wire snapshot of the current state.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        let (latitude, longitude) = self.position.unwrap_or_default();
        TelemetrySnapshot {
            latitude,
            longitude,
            altitude: round_to(self.altitude, 2),
            speed: round_to(self.speed, 2),
            battery_level: round_to(self.battery, 1),
            status: self.status,
        }
    }

    /// Current drone status.
    pub fn status(&self) -> DroneStatus {
        self.status
    }

    /// Current battery charge in percent.
    pub fn battery(&self) -> f64 {
        self.battery
    }

    /// One flying step: orbit, altitude random walk, battery drain.
    fn fly(&mut self, elapsed: f64) {
        self.angle += ORBIT_RATE * elapsed;
        self.position = Some((
            self.center_lat + ORBIT_RADIUS_DEG * self.angle.sin(),
            self.center_lon + ORBIT_RADIUS_DEG * self.angle.cos(),
        ));

        let noise = self.rng.gen_range(-ALTITUDE_NOISE_M..=ALTITUDE_NOISE_M);
        self.altitude = (self.altitude + noise).max(MIN_CRUISE_ALTITUDE_M);

        self.battery -= DRAIN_RATE * elapsed;
        if self.battery <= 0.0 {
            self.battery = 0.0;
            self.status = DroneStatus::Recharging;
            self.speed = 0.0;
            // Landed
            self.altitude = 0.0;
        }
    }

    /// One recharging step: charge until full, then resume cruise.
    fn recharge(&mut self, elapsed: f64) {
        self.battery += CHARGE_RATE * elapsed;
        if self.battery >= 100.0 {
            self.battery = 100.0;
            self.status = DroneStatus::Flying;
            self.speed = CRUISE_SPEED_KMH;
            self.altitude = CRUISE_ALTITUDE_M;
        }
    }

    /// Current orbit angle (for tests).
    #[cfg(test)]
    pub(crate) fn angle(&self) -> f64 {
        self.angle
    }

    /// Unrounded altitude (for tests).
    #[cfg(test)]
    pub(crate) fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Unrounded speed (for tests).
    #[cfg(test)]
    pub(crate) fn speed(&self) -> f64 {
        self.speed
    }

    /// Force a battery level (for tests needing a specific charge state).
    #[cfg(test)]
    pub(crate) fn set_battery(&mut self, percent: f64) {
        self.battery = percent;
    }

    /// Force an altitude (for tests exercising the noise floor).
    #[cfg(test)]
    pub(crate) fn set_altitude(&mut self, meters: f64) {
        self.altitude = meters;
    }
}
