//! Data-driven physics and layout tuning
//!
//! Sizes are expressed in tile units so the same tuning fits any tile size;
//! velocities and accelerations are absolute world units.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics, forgiveness and sizing constants for one level instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Kinematics ===
    /// Downward acceleration (units/s²)
    pub gravity: f64,
    /// Vertical velocity applied by a jump (negative is up)
    pub jump_velocity: f64,
    /// Visual spin rate during a jump (degrees/s)
    pub rotation_speed: f64,
    /// Rotation covered by one jump (degrees)
    pub jump_sweep_deg: f64,

    // === Forgiveness ===
    /// Coyote window after walking off a ledge (ticks)
    pub coyote_ticks: u32,
    /// How long an early jump press is remembered (ticks)
    pub jump_buffer_ticks: u32,
    /// Hazard immunity after (re)spawn (seconds)
    pub invincibility_secs: f64,

    // === Stepping ===
    /// Ceiling applied to each step's delta (seconds)
    pub max_dt: f64,
    /// World scroll speed (units/s)
    pub scroll_speed: f64,

    // === Sizes (tile units) ===
    pub player_scale: f64,
    /// Visual rect relative to the hitbox (sprite art may overhang)
    pub player_visual_scale: f64,
    pub spike_scale: f64,
    /// Fraction of the spike's visual width that actually kills
    pub spike_hitbox_ratio: f64,
    pub pickup_scale: f64,
    pub goal_height_tiles: f64,
    /// Distance below the layout bottom before a fall is fatal
    pub death_zone_margin_tiles: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            rotation_speed: ROTATION_SPEED,
            jump_sweep_deg: JUMP_SWEEP_DEG,

            coyote_ticks: COYOTE_TICKS,
            jump_buffer_ticks: JUMP_BUFFER_TICKS,
            invincibility_secs: INVINCIBILITY_SECS,

            max_dt: MAX_DT,
            scroll_speed: SCROLL_SPEED,

            player_scale: 0.55,
            player_visual_scale: 1.0,
            spike_scale: 0.7,
            spike_hitbox_ratio: 0.5,
            pickup_scale: 0.6,
            goal_height_tiles: 4.0,
            death_zone_margin_tiles: 2.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Scale velocities and accelerations for a level authored at a different tile size.
    ///
    /// Air time and rotation timing are unchanged; jump height and horizontal
    /// jump distance scale with `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            gravity: self.gravity * factor,
            jump_velocity: self.jump_velocity * factor,
            scroll_speed: self.scroll_speed * factor,
            ..self.clone()
        }
    }

    /// Replace values the simulation cannot work with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        fn positive(value: &mut f64, default: f64, name: &str) {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Tuning: {name} = {value} is invalid, using {default}");
                *value = default;
            }
        }

        fn non_negative(value: &mut f64, default: f64, name: &str) {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("Tuning: {name} = {value} is invalid, using {default}");
                *value = default;
            }
        }

        positive(&mut self.gravity, defaults.gravity, "gravity");
        positive(&mut self.rotation_speed, defaults.rotation_speed, "rotation_speed");
        positive(&mut self.jump_sweep_deg, defaults.jump_sweep_deg, "jump_sweep_deg");
        positive(&mut self.max_dt, defaults.max_dt, "max_dt");
        positive(&mut self.player_scale, defaults.player_scale, "player_scale");
        positive(&mut self.player_visual_scale, defaults.player_visual_scale, "player_visual_scale");
        positive(&mut self.spike_scale, defaults.spike_scale, "spike_scale");
        positive(&mut self.spike_hitbox_ratio, defaults.spike_hitbox_ratio, "spike_hitbox_ratio");
        positive(&mut self.pickup_scale, defaults.pickup_scale, "pickup_scale");
        positive(&mut self.goal_height_tiles, defaults.goal_height_tiles, "goal_height_tiles");
        non_negative(&mut self.scroll_speed, defaults.scroll_speed, "scroll_speed");
        non_negative(&mut self.invincibility_secs, defaults.invincibility_secs, "invincibility_secs");
        non_negative(
            &mut self.death_zone_margin_tiles,
            defaults.death_zone_margin_tiles,
            "death_zone_margin_tiles",
        );

        // A jump must go up
        if !self.jump_velocity.is_finite() || self.jump_velocity >= 0.0 {
            log::warn!(
                "Tuning: jump_velocity = {} is invalid, using {}",
                self.jump_velocity,
                defaults.jump_velocity
            );
            self.jump_velocity = defaults.jump_velocity;
        }

        self
    }

    /// Coyote window expressed in seconds at the assumed step rate
    pub fn coyote_secs(&self) -> f64 {
        self.coyote_ticks as f64 / ASSUMED_STEP_HZ
    }

    /// Jump buffer window expressed in seconds at the assumed step rate
    pub fn jump_buffer_secs(&self) -> f64 {
        self.jump_buffer_ticks as f64 / ASSUMED_STEP_HZ
    }
}
