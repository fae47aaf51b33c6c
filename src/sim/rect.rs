//! Axis-aligned rectangles in world space
//!
//! Y grows downward (screen convention), so `top < bottom`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: DVec2,
    /// Width and height (non-negative)
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(w.max(0.0), h.max(0.0)),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    /// Rectangle of the given size whose bottom edge is centered on `anchor`
    pub fn from_bottom_center(anchor: DVec2, size: DVec2) -> Self {
        Self::new(anchor.x - size.x / 2.0, anchor.y - size.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.y
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Strict overlap test: rectangles that only share an edge do not
    /// intersect, and an empty rect intersects nothing
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether the horizontal extents overlap (edges touching excluded)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    pub fn translated(&self, offset: DVec2) -> Self {
        Self {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    /// Same rect, resized around its center
    pub fn scaled_about_center(&self, factor: f64) -> Self {
        Self::from_center(self.center(), self.size * factor)
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.pos.y = bottom - self.size.y;
    }

    pub fn set_top(&mut self, top: f64) {
        self.pos.y = top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), DVec2::new(25.0, 40.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&right));
        assert!(a.intersects(&Rect::new(9.9, 9.9, 1.0, 1.0)));
    }

    #[test]
    fn test_bottom_center_anchor() {
        let r = Rect::from_bottom_center(DVec2::new(50.0, 100.0), DVec2::new(20.0, 30.0));
        assert_eq!(r.bottom(), 100.0);
        assert_eq!(r.center().x, 50.0);
        assert_eq!(r.left(), 40.0);
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Rect::new(0.0, 0.0, -5.0, 3.0);
        assert_eq!(r.width(), 0.0);
        assert!(r.is_empty());
        assert!(!r.intersects(&Rect::new(-1.0, -1.0, 10.0, 10.0)));
        assert!(!Rect::new(-1.0, -1.0, 10.0, 10.0).intersects(&r));
    }
}
