//! Render-ready transforms
//!
//! Derived fresh from simulation state every frame. Nothing here is fed back
//! into collision: rotation and camera offset only ever exist in these values.

use glam::DVec2;

use super::entity::{self, EntityKind};
use super::level::Level;
use super::rect::Rect;

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Player,
    Entity(EntityKind),
}

/// Screen-space placement of one sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    pub kind: SpriteKind,
    /// Unrotated screen rect
    pub rect: Rect,
    /// Clockwise degrees about `rect.center()`
    pub rotation_deg: f64,
}

impl RenderTransform {
    pub fn center(&self) -> DVec2 {
        self.rect.center()
    }
}

/// Player sprite placement
pub fn player_transform(level: &Level) -> RenderTransform {
    let player = level.player();
    RenderTransform {
        kind: SpriteKind::Player,
        rect: level.camera().project(&player.visual_rect()),
        rotation_deg: player.rotation_deg,
    }
}

/// Collect every visible sprite into `out` (cleared first), entities in layout
/// order then the player on top.
///
/// Pass the same buffer each frame to avoid reallocating.
pub fn collect_render_transforms(level: &Level, viewport_width: f64, out: &mut Vec<RenderTransform>) {
    out.clear();
    let camera = level.camera();

    for e in level.entities() {
        if !entity::is_drawn(e) {
            continue;
        }
        let rect = entity::visual_rect(e);
        if !camera.is_visible(&rect, viewport_width) {
            continue;
        }
        out.push(RenderTransform {
            kind: SpriteKind::Entity(e.kind()),
            rect: camera.project(&rect),
            rotation_deg: 0.0,
        });
    }

    out.push(player_transform(level));
}

impl Level {
    /// Fresh transform list for one frame; see [`collect_render_transforms`]
    /// to reuse a buffer instead
    pub fn render_transforms(&self, viewport_width: f64) -> Vec<RenderTransform> {
        let mut out = Vec::new();
        collect_render_transforms(self, viewport_width, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::SIM_DT;
    use crate::sim::layout::LevelLayout;

    fn level() -> Level {
        let rows = vec!["  O".to_string(), "=".repeat(40)];
        let layout = LevelLayout::new(rows, 10.0).with_player_start(DVec2::new(0.0, 4.5));
        Level::new(layout, Tuning::default().scaled(0.1))
    }

    #[test]
    fn test_culls_offscreen_entities() {
        let level = level();
        let mut out = Vec::new();
        collect_render_transforms(&level, 100.0, &mut out);
        // 10 ground tiles + pickup + player
        assert_eq!(out.len(), 12);
        assert_eq!(out.last().map(|t| t.kind), Some(SpriteKind::Player));
    }

    #[test]
    fn test_render_transforms_matches_buffer() {
        let mut level = level();
        for _ in 0..10 {
            level.step(SIM_DT, false);
        }
        let mut out = Vec::new();
        collect_render_transforms(&level, 100.0, &mut out);
        assert_eq!(level.render_transforms(100.0), out);
    }

    #[test]
    fn test_player_stays_put_on_screen() {
        let mut level = level();
        let before = player_transform(&level).rect.left();
        for _ in 0..30 {
            level.step(SIM_DT, false);
        }
        let after = player_transform(&level).rect.left();
        assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn test_collected_pickup_not_drawn() {
        let mut level = level();
        let mut collected = false;
        for _ in 0..120 {
            if level.step(SIM_DT, false).collected_pickup() {
                collected = true;
                break;
            }
        }
        assert!(collected);
        let mut out = Vec::new();
        collect_render_transforms(&level, 1000.0, &mut out);
        assert!(
            !out.iter()
                .any(|t| t.kind == SpriteKind::Entity(EntityKind::Pickup))
        );
    }

    #[test]
    fn test_rotation_only_on_player() {
        let mut level = level();
        level.step(SIM_DT, true);
        level.step(SIM_DT, false);
        let mut out = Vec::new();
        collect_render_transforms(&level, 100.0, &mut out);
        let player = out.last().copied();
        assert!(player.is_some_and(|t| t.rotation_deg > 0.0));
        assert!(out[..out.len() - 1].iter().all(|t| t.rotation_deg == 0.0));
        // Hitbox is never rotated or offset
        let size = level.player().hitbox().size;
        assert!((size - DVec2::splat(5.5)).abs().max_element() < 1e-9);
    }
}
