//! Level entities as a closed set of kinds
//!
//! Everything the player can touch is one `Entity` variant. Behavior lives in
//! free functions that match on the kind, so iteration over "all entities in
//! view" stays polymorphic without trait objects.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Ground or floating platform. Landing on top is safe; hitting a side is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    pub rect: Rect,
}

/// Spike. Only the narrower `hitbox` kills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
    pub hitbox: Rect,
}

/// Grants one extra mid-air jump, once per level instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub rect: Rect,
    pub hitbox: Rect,
    pub collected: bool,
}

/// Level-complete trigger region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
}

/// Effect handed to the player controller after a successful collect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupEffect {
    GrantDoubleJump,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Solid(Solid),
    Hazard(Hazard),
    Pickup(Pickup),
    Goal(Goal),
}

/// Discriminant only, for render lookups and counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Solid,
    Hazard,
    Pickup,
    Goal,
}

impl Pickup {
    /// Collect if overlapping. Returns the effect exactly once per instance.
    pub fn try_collect(&mut self, player_hitbox: &Rect) -> Option<PickupEffect> {
        if self.collected || !self.hitbox.intersects(player_hitbox) {
            return None;
        }
        self.collected = true;
        Some(PickupEffect::GrantDoubleJump)
    }
}

impl Goal {
    #[inline]
    pub fn check(&self, player_hitbox: &Rect) -> bool {
        self.rect.intersects(player_hitbox)
    }
}

impl Hazard {
    #[inline]
    pub fn hits(&self, player_hitbox: &Rect) -> bool {
        self.hitbox.intersects(player_hitbox)
    }
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Solid(_) => EntityKind::Solid,
            Entity::Hazard(_) => EntityKind::Hazard,
            Entity::Pickup(_) => EntityKind::Pickup,
            Entity::Goal(_) => EntityKind::Goal,
        }
    }
}

/// Full-size rect used for drawing and culling
pub fn visual_rect(entity: &Entity) -> Rect {
    match entity {
        Entity::Solid(s) => s.rect,
        Entity::Hazard(h) => h.rect,
        Entity::Pickup(p) => p.rect,
        Entity::Goal(g) => g.rect,
    }
}

/// Whether the entity should still be drawn
pub fn is_drawn(entity: &Entity) -> bool {
    match entity {
        Entity::Pickup(p) => !p.collected,
        _ => true,
    }
}

/// Iterate the rects of every solid block
pub fn solid_rects(entities: &[Entity]) -> impl Iterator<Item = &Rect> + Clone {
    entities.iter().filter_map(|e| match e {
        Entity::Solid(s) => Some(&s.rect),
        _ => None,
    })
}

pub fn hazards(entities: &[Entity]) -> impl Iterator<Item = &Hazard> {
    entities.iter().filter_map(|e| match e {
        Entity::Hazard(h) => Some(h),
        _ => None,
    })
}

pub fn goals(entities: &[Entity]) -> impl Iterator<Item = &Goal> {
    entities.iter().filter_map(|e| match e {
        Entity::Goal(g) => Some(g),
        _ => None,
    })
}

/// Rightmost edge of any entity (0 for an empty level)
pub fn rightmost_edge(entities: &[Entity]) -> f64 {
    entities
        .iter()
        .map(|e| visual_rect(e).right())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickup_at(x: f64) -> Pickup {
        let rect = Rect::new(x, 0.0, 10.0, 10.0);
        Pickup {
            rect,
            hitbox: rect,
            collected: false,
        }
    }

    #[test]
    fn test_pickup_collects_once() {
        let mut pickup = pickup_at(0.0);
        let player = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(
            pickup.try_collect(&player),
            Some(PickupEffect::GrantDoubleJump)
        );
        assert!(pickup.collected);
        assert_eq!(pickup.try_collect(&player), None);
    }

    #[test]
    fn test_pickup_ignores_distant_player() {
        let mut pickup = pickup_at(100.0);
        assert_eq!(pickup.try_collect(&Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        assert!(!pickup.collected);
    }

    #[test]
    fn test_hazard_uses_hitbox_not_visual() {
        let hazard = Hazard {
            rect: Rect::new(0.0, 0.0, 20.0, 20.0),
            hitbox: Rect::new(5.0, 0.0, 10.0, 20.0),
        };
        // Overlaps the visual corner only
        assert!(!hazard.hits(&Rect::new(-3.0, 0.0, 5.0, 5.0)));
        assert!(hazard.hits(&Rect::new(4.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_dispatch_by_kind() {
        let entities = vec![
            Entity::Solid(Solid {
                rect: Rect::new(0.0, 10.0, 10.0, 10.0),
            }),
            Entity::Pickup(pickup_at(20.0)),
            Entity::Goal(Goal {
                rect: Rect::new(40.0, 0.0, 10.0, 40.0),
            }),
        ];
        assert_eq!(solid_rects(&entities).count(), 1);
        assert_eq!(goals(&entities).count(), 1);
        assert_eq!(entities[1].kind(), EntityKind::Pickup);
        assert_eq!(rightmost_edge(&entities), 50.0);
        assert_eq!(rightmost_edge(&[]), 0.0);
    }
}
