//! Level orchestration: per-step update order, events, and reset
//!
//! A `World` is everything that changes while playing. It is only ever built
//! from the immutable `LevelLayout` + `Tuning` pair, both on first load and on
//! reset, so a reset cannot forget a field.

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entity::{self, Entity};
use super::layout::{LevelLayout, build_entities};
use super::player::{JumpOutcome, Player};
use crate::clamp_dt;
use crate::tuning::Tuning;

/// Lifecycle of one level instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    Running,
    /// Goal reached; stepping is a no-op until reset
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Ran into the side of a solid
    Wall,
    Hazard,
    /// Dropped below the death zone
    FellOut,
}

/// Discrete events emitted by a step, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEvent {
    Jumped,
    DoubleJumped,
    /// Cosmetic touchdown (dust puffs)
    Landed,
    /// Index into `World::entities`
    CollectedPickup { index: usize },
    ReachedGoal,
    Died { cause: DeathCause },
}

/// Outcome of one `Level::step`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResult {
    pub died: bool,
    pub completed: bool,
    pub events: Vec<LevelEvent>,
}

impl StepResult {
    pub fn death_cause(&self) -> Option<DeathCause> {
        self.events.iter().find_map(|e| match e {
            LevelEvent::Died { cause } => Some(*cause),
            _ => None,
        })
    }

    pub fn collected_pickup(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, LevelEvent::CollectedPickup { .. }))
    }

    pub fn landed(&self) -> bool {
        self.events.contains(&LevelEvent::Landed)
    }

    fn die(mut self, cause: DeathCause) -> Self {
        log::debug!("Player died: {cause:?}");
        self.died = true;
        self.events.push(LevelEvent::Died { cause });
        self
    }
}

/// All mutable simulation state of a level instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub camera: Camera,
    pub player: Player,
    /// Row-major, in layout order
    pub entities: Vec<Entity>,
    pub phase: LevelPhase,
    /// Seconds of hazard immunity left
    pub invincibility: f64,
    /// Steps taken since (re)spawn
    pub time_ticks: u64,
    /// Simulated seconds since (re)spawn
    pub elapsed: f64,
}

impl World {
    /// Fresh state for a layout. Pure: same inputs, identical world.
    pub fn build(layout: &LevelLayout, tuning: &Tuning) -> Self {
        Self {
            camera: Camera::new(tuning.scroll_speed),
            player: Player::new(layout.start(), layout.effective_tile_size(), tuning),
            entities: build_entities(layout, tuning),
            phase: LevelPhase::Running,
            invincibility: tuning.invincibility_secs,
            time_ticks: 0,
            elapsed: 0.0,
        }
    }
}

/// A playable level: immutable description plus the live world
#[derive(Debug, Clone)]
pub struct Level {
    layout: LevelLayout,
    tuning: Tuning,
    /// Resolved by the host's asset cache; carried untouched across resets
    theme: Option<String>,
    world: World,
    end_x: f64,
    death_zone_y: f64,
}

impl Level {
    pub fn new(layout: LevelLayout, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let world = World::build(&layout, &tuning);
        let tile = layout.effective_tile_size();
        let end_x = layout.width().max(entity::rightmost_edge(&world.entities));
        let death_zone_y = layout.height() + tuning.death_zone_margin_tiles * tile;

        log::info!(
            "Level built: {} entities, {}x{} tiles, end x = {end_x}",
            world.entities.len(),
            layout.columns(),
            layout.rows.len()
        );

        Self {
            layout,
            tuning,
            theme: None,
            world,
            end_x,
            death_zone_y,
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Advance one simulation step.
    ///
    /// `jump_requested` is level-triggered: pass `true` every step the input
    /// is held.
    pub fn step(&mut self, dt: f64, jump_requested: bool) -> StepResult {
        let mut result = StepResult::default();
        if self.world.phase == LevelPhase::Completed {
            return result;
        }

        let dt = clamp_dt(dt, self.tuning.max_dt);
        let world = &mut self.world;
        world.time_ticks += 1;
        world.elapsed += dt;

        world.camera.advance(dt);
        world.invincibility = (world.invincibility - dt).max(0.0);

        if jump_requested {
            match world.player.request_jump() {
                JumpOutcome::Jumped => result.events.push(LevelEvent::Jumped),
                JumpOutcome::DoubleJumped => result.events.push(LevelEvent::DoubleJumped),
                JumpOutcome::Buffered | JumpOutcome::Ignored => {}
            }
        }

        let advance = world.player.advance(
            dt,
            entity::solid_rects(&world.entities),
            world.camera.scroll_speed,
        );
        if advance.buffered_jump {
            result.events.push(LevelEvent::Jumped);
        }
        if advance.died {
            return result.die(DeathCause::Wall);
        }

        let hitbox = world.player.hitbox();
        if hitbox.top() > self.death_zone_y {
            return result.die(DeathCause::FellOut);
        }

        if advance.landed {
            result.events.push(LevelEvent::Landed);
        }

        for (index, e) in world.entities.iter_mut().enumerate() {
            if let Entity::Pickup(pickup) = e {
                if let Some(effect) = pickup.try_collect(&hitbox) {
                    world.player.apply_pickup(effect);
                    log::debug!("Collected pickup #{index}");
                    result.events.push(LevelEvent::CollectedPickup { index });
                }
            }
        }

        if entity::goals(&world.entities).any(|g| g.check(&hitbox)) {
            world.phase = LevelPhase::Completed;
            world.camera.pause();
            log::info!(
                "Level completed after {} steps ({:.2}s)",
                world.time_ticks,
                world.elapsed
            );
            result.completed = true;
            result.events.push(LevelEvent::ReachedGoal);
            return result;
        }

        if world.invincibility <= 0.0 && entity::hazards(&world.entities).any(|h| h.hits(&hitbox)) {
            return result.die(DeathCause::Hazard);
        }

        result
    }

    /// Rebuild the world from the stored layout
    pub fn reset(&mut self) {
        self.world = World::build(&self.layout, &self.tuning);
        log::debug!("Level reset");
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    pub fn camera(&self) -> &Camera {
        &self.world.camera
    }

    pub fn entities(&self) -> &[Entity] {
        &self.world.entities
    }

    pub fn phase(&self) -> LevelPhase {
        self.world.phase
    }

    pub fn is_completed(&self) -> bool {
        self.world.phase == LevelPhase::Completed
    }

    pub fn camera_offset(&self) -> f64 {
        self.world.camera.offset_x
    }

    /// Rightmost world x of the level
    pub fn level_end_x(&self) -> f64 {
        self.end_x
    }

    pub fn player_start_x(&self) -> f64 {
        self.layout.start().x
    }

    /// Falling below this world y is fatal
    pub fn death_zone_y(&self) -> f64 {
        self.death_zone_y
    }

    /// Fraction of the level traversed, in [0, 1]
    pub fn progress(&self) -> f64 {
        let start = self.player_start_x();
        let span = self.end_x - start;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.world.player.pos.x - start) / span).clamp(0.0, 1.0)
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    pub fn tile_size(&self) -> f64 {
        self.layout.effective_tile_size()
    }
}
