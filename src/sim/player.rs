//! Kinematic controller for the player cube
//!
//! The player never steers horizontally: its world x advances with the scroll
//! so it stays glued to the camera. Vertical motion is semi-implicit Euler on a
//! float position. Rotation is purely visual and never touches the hitbox.
//!
//! Forgiveness windows (coyote time, jump buffer) count simulation steps, not
//! seconds; see `consts::ASSUMED_STEP_HZ` for the rate they were tuned at.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{is_supported, resolve_solids};
use super::entity::PickupEffect;
use super::rect::Rect;
use crate::tuning::Tuning;
use crate::{snap_angle, wrap_degrees};

/// Grounded/airborne state after the latest collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    Grounded,
    Airborne,
}

/// What a jump request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Regular jump (from the ground or inside the coyote window)
    Jumped,
    /// Mid-air jump granted by a pickup
    DoubleJumped,
    /// Remembered; fires after landing if the buffer has not expired
    Buffered,
    Ignored,
}

/// Input forgiveness state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JumpAssist {
    pub coyote_timer: u32,
    pub buffer_timer: u32,
    pub buffered: bool,
    pub can_double_jump: bool,
    pub double_jump_used: bool,
}

/// Physics constants copied out of `Tuning` at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPhysics {
    pub gravity: f64,
    pub jump_velocity: f64,
    pub rotation_speed: f64,
    pub jump_sweep_deg: f64,
    pub coyote_ticks: u32,
    pub jump_buffer_ticks: u32,
}

impl From<&Tuning> for PlayerPhysics {
    fn from(t: &Tuning) -> Self {
        Self {
            gravity: t.gravity,
            jump_velocity: t.jump_velocity,
            rotation_speed: t.rotation_speed,
            jump_sweep_deg: t.jump_sweep_deg,
            coyote_ticks: t.coyote_ticks,
            jump_buffer_ticks: t.jump_buffer_ticks,
        }
    }
}

/// Snapshot of the simulated pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Hitbox top-left, world space
    pub position: DVec2,
    pub velocity_y: f64,
    pub rotation_deg: f64,
}

/// Result of one `Player::advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceResult {
    /// Lateral impact with a solid
    pub died: bool,
    /// Airborne -> grounded this step
    pub landed: bool,
    /// A buffered request turned into a jump this step
    pub buffered_jump: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Hitbox top-left (float, world space)
    pub pos: DVec2,
    /// Hitbox size
    pub size: DVec2,
    /// Visual rect size relative to the hitbox
    pub visual_scale: f64,
    pub velocity_y: f64,
    /// Visual rotation, clockwise degrees
    pub rotation_deg: f64,
    /// Degrees left in the current jump sweep
    pub remaining_rotation: f64,
    pub state: MotionState,
    pub assist: JumpAssist,
    pub physics: PlayerPhysics,
}

impl Player {
    /// Spawn with the hitbox top-left at `start`
    pub fn new(start: DVec2, tile_size: f64, tuning: &Tuning) -> Self {
        let side = tile_size * tuning.player_scale;
        Self {
            pos: start,
            size: DVec2::splat(side),
            visual_scale: tuning.player_visual_scale,
            velocity_y: 0.0,
            rotation_deg: 0.0,
            remaining_rotation: 0.0,
            state: MotionState::Grounded,
            assist: JumpAssist::default(),
            physics: PlayerPhysics::from(tuning),
        }
    }

    #[inline]
    pub fn hitbox(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Sprite rect, centered on the hitbox. Rotation is applied at draw time.
    pub fn visual_rect(&self) -> Rect {
        self.hitbox().scaled_about_center(self.visual_scale)
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.pos,
            velocity_y: self.velocity_y,
            rotation_deg: self.rotation_deg,
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state == MotionState::Grounded
    }

    /// Whether a sweep is still rotating the sprite
    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.remaining_rotation > 0.0
    }

    /// Ask for a jump. Safe to call every step while the input is held.
    pub fn request_jump(&mut self) -> JumpOutcome {
        let coyote = self.state == MotionState::Airborne && self.assist.coyote_timer > 0;

        if self.state == MotionState::Grounded || coyote {
            self.trigger_jump();
            log::trace!("jump (coyote: {coyote})");
            return JumpOutcome::Jumped;
        }

        if self.assist.can_double_jump && !self.assist.double_jump_used {
            self.trigger_jump();
            self.assist.double_jump_used = true;
            self.assist.can_double_jump = false;
            log::trace!("double jump");
            return JumpOutcome::DoubleJumped;
        }

        if self.physics.jump_buffer_ticks > 0 {
            self.assist.buffered = true;
            self.assist.buffer_timer = self.physics.jump_buffer_ticks;
            return JumpOutcome::Buffered;
        }

        JumpOutcome::Ignored
    }

    /// Apply a pickup's effect
    pub fn apply_pickup(&mut self, effect: PickupEffect) {
        match effect {
            PickupEffect::GrantDoubleJump => {
                self.assist.can_double_jump = true;
                self.assist.double_jump_used = false;
            }
        }
    }

    fn trigger_jump(&mut self) {
        self.velocity_y = self.physics.jump_velocity;
        // A jump mid-sweep extends the spin so it still ends on a half turn
        self.remaining_rotation += self.physics.jump_sweep_deg;
        self.assist.coyote_timer = 0;
        self.assist.buffered = false;
        self.assist.buffer_timer = 0;
    }

    fn advance_rotation(&mut self, dt: f64) {
        if self.remaining_rotation <= 0.0 {
            return;
        }
        let step = self.physics.rotation_speed * dt;
        if step >= self.remaining_rotation {
            self.rotation_deg += self.remaining_rotation;
            self.remaining_rotation = 0.0;
            self.settle_rotation();
        } else {
            self.rotation_deg += step;
            self.remaining_rotation -= step;
        }
    }

    /// Rest the sprite on the nearest half turn
    fn settle_rotation(&mut self) {
        self.rotation_deg = wrap_degrees(snap_angle(self.rotation_deg, self.physics.jump_sweep_deg));
        self.remaining_rotation = 0.0;
    }

    /// Advance one simulation step against static solids.
    ///
    /// Call exactly once per step, after any `request_jump` for that step.
    pub fn advance<'a, I>(&mut self, dt: f64, solids: I, scroll_speed: f64) -> AdvanceResult
    where
        I: IntoIterator<Item = &'a Rect> + Clone,
    {
        let was = self.state;
        let prev_top = self.pos.y;
        let prev_bottom = self.pos.y + self.size.y;

        // Glued to the scroll
        self.pos.x += scroll_speed * dt;

        // Semi-implicit Euler
        self.velocity_y += self.physics.gravity * dt;
        self.pos.y += self.velocity_y * dt;

        if was == MotionState::Airborne {
            self.assist.coyote_timer = self.assist.coyote_timer.saturating_sub(1);
        }

        self.advance_rotation(dt);

        let mut hitbox = self.hitbox();
        let contact = resolve_solids(
            &mut hitbox,
            &mut self.velocity_y,
            prev_top,
            prev_bottom,
            solids.clone(),
        );
        let mut grounded = contact.grounded;
        if !grounded && self.velocity_y >= 0.0 && is_supported(&hitbox, solids) {
            grounded = true;
            self.velocity_y = 0.0;
        }
        self.pos = hitbox.pos;

        let landed = was == MotionState::Airborne && grounded;
        if landed && self.is_spinning() {
            self.settle_rotation();
        }

        // Buffered presses fire on the step after touchdown
        let mut buffered_jump = false;
        if self.assist.buffered && grounded && was == MotionState::Grounded {
            self.trigger_jump();
            buffered_jump = true;
            log::trace!("buffered jump fired");
        }

        if grounded {
            self.state = MotionState::Grounded;
            self.assist.coyote_timer = 0;
            self.assist.can_double_jump = false;
            self.assist.double_jump_used = false;
        } else {
            if was == MotionState::Grounded && self.velocity_y >= 0.0 {
                // Walked off a ledge
                self.assist.coyote_timer = self.physics.coyote_ticks;
            }
            self.state = MotionState::Airborne;
        }

        if self.assist.buffer_timer > 0 {
            self.assist.buffer_timer -= 1;
            if self.assist.buffer_timer == 0 {
                self.assist.buffered = false;
            }
        }

        AdvanceResult {
            died: contact.side_hit,
            landed,
            buffered_jump,
        }
    }
}
