//! Side-based collision resolution against static solids
//!
//! One pass, every solid, no spatial index. The approach side is decided from
//! the hitbox position before this step's vertical integration, never from
//! the partially corrected one, so landing on a platform edge does not read
//! as a wall hit.

use super::rect::Rect;
use crate::consts::CONTACT_EPSILON;

/// Which face of a solid the player was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSide {
    /// Landed on the solid's top face
    Top,
    /// Bumped the solid's bottom face while rising
    Bottom,
    /// Ran into the solid's left or right face
    Side,
}

/// Outcome of resolving one step's overlaps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Standing on a solid after resolution
    pub grounded: bool,
    /// Hit a ceiling this step
    pub bumped_head: bool,
    /// Lateral impact (fatal)
    pub side_hit: bool,
}

/// Classify an overlap from the pre-step vertical extent
pub fn contact_side(velocity_y: f64, prev_top: f64, prev_bottom: f64, solid: &Rect) -> ContactSide {
    if velocity_y > 0.0 && prev_top < solid.top() {
        ContactSide::Top
    } else if velocity_y < 0.0 && prev_bottom > solid.top() {
        ContactSide::Bottom
    } else {
        ContactSide::Side
    }
}

/// Resolve `hitbox` out of every overlapping solid.
///
/// `prev_top`/`prev_bottom` are the hitbox's vertical edges before this step's
/// gravity integration. `velocity_y` is zeroed on top/bottom contacts.
pub fn resolve_solids<'a>(
    hitbox: &mut Rect,
    velocity_y: &mut f64,
    prev_top: f64,
    prev_bottom: f64,
    solids: impl IntoIterator<Item = &'a Rect>,
) -> CollisionResult {
    let mut result = CollisionResult::default();

    for solid in solids {
        if !hitbox.intersects(solid) {
            continue;
        }

        match contact_side(*velocity_y, prev_top, prev_bottom, solid) {
            ContactSide::Top => {
                hitbox.set_bottom(solid.top());
                *velocity_y = 0.0;
                result.grounded = true;
            }
            ContactSide::Bottom => {
                hitbox.set_top(solid.bottom());
                *velocity_y = 0.0;
                result.bumped_head = true;
            }
            ContactSide::Side => {
                if hitbox.center().x <= solid.center().x {
                    hitbox.pos.x = solid.left() - hitbox.width();
                } else {
                    hitbox.pos.x = solid.right();
                }
                result.side_hit = true;
            }
        }
    }

    result
}

/// Whether the hitbox rests exactly on top of some solid.
///
/// Covers steps where nothing moved (zero delta) so resting contact still
/// counts as grounded.
pub fn is_supported<'a>(hitbox: &Rect, solids: impl IntoIterator<Item = &'a Rect>) -> bool {
    solids.into_iter().any(|solid| {
        (solid.top() - hitbox.bottom()).abs() <= CONTACT_EPSILON && hitbox.overlaps_x(solid)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(x: f64, y: f64) -> Rect {
        Rect::new(x, y, 10.0, 10.0)
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let ground = Rect::new(0.0, 100.0, 50.0, 50.0);
        // Pre-step: bottom at 99, fell 3 units
        let mut hitbox = player(10.0, 92.0);
        let mut vy = 180.0;
        let result = resolve_solids(&mut hitbox, &mut vy, 89.0, 99.0, [&ground]);
        assert!(result.grounded);
        assert!(!result.side_hit);
        assert_eq!(hitbox.bottom(), 100.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_landing_on_edge_is_not_side_hit() {
        // Player barely clips the platform's left corner while falling
        let platform = Rect::new(100.0, 100.0, 50.0, 10.0);
        let mut hitbox = player(91.0, 92.0);
        let mut vy = 200.0;
        let result = resolve_solids(&mut hitbox, &mut vy, 88.0, 98.0, [&platform]);
        assert!(result.grounded);
        assert!(!result.side_hit);
    }

    #[test]
    fn test_head_bump() {
        let ceiling = Rect::new(0.0, 0.0, 50.0, 20.0);
        let mut hitbox = player(10.0, 18.0);
        let mut vy = -400.0;
        let result = resolve_solids(&mut hitbox, &mut vy, 22.0, 32.0, [&ceiling]);
        assert!(result.bumped_head);
        assert_eq!(hitbox.top(), 20.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_wall_is_side_hit() {
        let wall = Rect::new(100.0, 0.0, 20.0, 100.0);
        // Player level with the wall's middle, scrolled into its left face
        let mut hitbox = player(95.0, 50.0);
        let mut vy = 40.0;
        let result = resolve_solids(&mut hitbox, &mut vy, 49.0, 59.0, [&wall]);
        assert!(result.side_hit);
        assert!(!result.grounded);
        assert_eq!(hitbox.right(), 100.0);
    }

    #[test]
    fn test_rising_into_platform_corner_bumps_head() {
        // Top already above the platform's underside, scrolled into its corner
        let platform = Rect::new(100.0, 0.0, 60.0, 20.0);
        let mut hitbox = player(95.0, 14.0);
        let mut vy = -50.0;
        let result = resolve_solids(&mut hitbox, &mut vy, 15.0, 25.0, [&platform]);
        assert_eq!(contact_side(-50.0, 15.0, 25.0, &platform), ContactSide::Bottom);
        assert!(result.bumped_head);
        assert!(!result.side_hit);
        assert_eq!(hitbox.top(), 20.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_adjacent_ground_tiles_single_snap() {
        let a = Rect::new(0.0, 100.0, 10.0, 10.0);
        let b = Rect::new(10.0, 100.0, 10.0, 10.0);
        let mut hitbox = player(5.0, 91.0);
        let mut vy = 60.0;
        let result = resolve_solids(&mut hitbox, &mut vy, 90.0, 100.0, [&a, &b]);
        assert!(result.grounded);
        assert!(!result.side_hit);
        assert_eq!(hitbox.bottom(), 100.0);
    }

    #[test]
    fn test_support_probe() {
        let ground = Rect::new(0.0, 100.0, 50.0, 50.0);
        assert!(is_supported(&player(10.0, 90.0), [&ground]));
        assert!(!is_supported(&player(10.0, 80.0), [&ground]));
        assert!(!is_supported(&player(60.0, 90.0), [&ground]));
    }
}
