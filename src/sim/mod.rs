//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped timestep only
//! - No I/O (layouts arrive already loaded)
//! - Stable iteration order (layout order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod entity;
pub mod layout;
pub mod level;
pub mod player;
pub mod rect;
pub mod view;

pub use camera::Camera;
pub use collision::{CollisionResult, ContactSide, contact_side, is_supported, resolve_solids};
pub use entity::{Entity, EntityKind, Goal, Hazard, Pickup, PickupEffect, Solid};
pub use layout::{LevelLayout, build_entities};
pub use level::{DeathCause, Level, LevelEvent, LevelPhase, StepResult, World};
pub use player::{AdvanceResult, JumpAssist, JumpOutcome, MotionState, Player, PlayerPhysics, Pose};
pub use rect::Rect;
pub use view::{RenderTransform, SpriteKind, collect_render_transforms, player_transform};
