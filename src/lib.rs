//! Dash Runner - An auto-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, level lifecycle)
//! - `tuning`: Data-driven physics and layout constants
//! - `level_file`: JSON level files mapped onto layout grids
//! - `autopilot`: Input policies for demo/idle play

pub mod autopilot;
pub mod level_file;
pub mod sim;
pub mod tuning;

pub use level_file::LevelFile;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Step rate the tick-based forgiveness windows were tuned against
    pub const ASSUMED_STEP_HZ: f64 = 60.0;
    /// Nominal simulation timestep
    pub const SIM_DT: f64 = 1.0 / ASSUMED_STEP_HZ;
    /// Ceiling applied to every step's delta (keeps gravity integration stable)
    pub const MAX_DT: f64 = 1.0 / ASSUMED_STEP_HZ;

    /// Player physics
    pub const GRAVITY: f64 = 2500.0;
    pub const JUMP_VELOCITY: f64 = -800.0;
    /// 180 degrees in exactly 0.25 s
    pub const ROTATION_SPEED: f64 = 720.0;
    pub const JUMP_SWEEP_DEG: f64 = 180.0;

    /// Forgiveness windows (ticks, not seconds)
    pub const COYOTE_TICKS: u32 = 5;
    pub const JUMP_BUFFER_TICKS: u32 = 5;

    /// Post-respawn hazard grace window (seconds)
    pub const INVINCIBILITY_SECS: f64 = 0.5;

    /// World scroll (5 px per frame at 60 Hz)
    pub const SCROLL_SPEED: f64 = 300.0;

    /// Layout defaults
    pub const DEFAULT_TILE_SIZE: f64 = 75.0;
    pub const DEFAULT_START_X: f64 = 100.0;
    pub const DEFAULT_START_Y: f64 = 200.0;

    /// Float slack for contact tests
    pub const CONTACT_EPSILON: f64 = 1e-6;
}

/// Round an angle (degrees) to the nearest multiple of `step`
#[inline]
pub fn snap_angle(angle: f64, step: f64) -> f64 {
    (angle / step).round() * step
}

/// Wrap an angle (degrees) into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Clamp a wall-clock delta into the simulation's accepted range
#[inline]
pub fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}
