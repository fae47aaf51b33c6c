//! Input policies for demo/idle play and replays
//!
//! A policy looks at the level once per step and answers "hold jump?".

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Entity, Level, Rect, entity};

pub trait JumpPolicy {
    fn decide(&mut self, level: &Level) -> bool;
}

/// Looks ahead along the player's path and jumps just before a threat
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// How long before contact to press jump (seconds of scroll)
    pub lead_secs: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { lead_secs: 0.14 }
    }
}

impl Autopilot {
    /// Horizontal gap to the nearest spike or wall face in the player's band,
    /// if one lies ahead
    pub fn nearest_threat_gap(level: &Level) -> Option<f64> {
        let player = level.player().hitbox();
        level
            .entities()
            .iter()
            .filter_map(|e| threat_rect(e, &player))
            .filter(|r| r.right() > player.left())
            .map(|r| r.left() - player.right())
            .filter(|gap| *gap >= 0.0)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Rect that would kill a player with this hitbox, if any
fn threat_rect(e: &Entity, player: &Rect) -> Option<Rect> {
    let in_band = |r: &Rect| r.top() < player.bottom() && r.bottom() > player.top();
    match e {
        Entity::Hazard(h) if in_band(&h.hitbox) => Some(h.hitbox),
        // A solid whose top is above the player's feet is a wall face
        Entity::Solid(s) if in_band(&s.rect) => Some(s.rect),
        _ => None,
    }
}

impl JumpPolicy for Autopilot {
    fn decide(&mut self, level: &Level) -> bool {
        let Some(gap) = Self::nearest_threat_gap(level) else {
            return false;
        };
        let lead = level.camera().scroll_speed * self.lead_secs;
        if gap > lead {
            return false;
        }

        let player = level.player();
        let assist = &player.assist;
        let double_ready = assist.can_double_jump && !assist.double_jump_used;
        player.is_grounded() || assist.coyote_timer > 0 || (double_ready && player.velocity_y > 0.0)
    }
}

/// Presses jump at random with a fixed chance per step (seeded, reproducible)
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
    press_chance: f64,
}

impl RandomPolicy {
    pub fn new(seed: u64, press_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            press_chance: press_chance.clamp(0.0, 1.0),
        }
    }
}

impl JumpPolicy for RandomPolicy {
    fn decide(&mut self, _level: &Level) -> bool {
        self.rng.random_bool(self.press_chance)
    }
}

/// Replays presses on fixed step numbers (1-based, counted since spawn)
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    press_ticks: Vec<u64>,
}

impl ScriptedPolicy {
    pub fn new(mut press_ticks: Vec<u64>) -> Self {
        press_ticks.sort_unstable();
        press_ticks.dedup();
        Self { press_ticks }
    }
}

impl JumpPolicy for ScriptedPolicy {
    fn decide(&mut self, level: &Level) -> bool {
        // The step about to run
        let tick = level.world().time_ticks + 1;
        self.press_ticks.binary_search(&tick).is_ok()
    }
}

/// Count of hazards in a level (for run summaries)
pub fn hazard_count(level: &Level) -> usize {
    entity::hazards(level.entities()).count()
}
