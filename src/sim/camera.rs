//! Horizontally scrolling camera
//!
//! The world never moves. The camera offset grows at the scroll speed and
//! rendering subtracts it; collision never sees it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World x shown at the left screen edge (monotonic, non-negative)
    pub offset_x: f64,
    /// Units per second
    pub scroll_speed: f64,
    pub paused: bool,
}

impl Camera {
    pub fn new(scroll_speed: f64) -> Self {
        Self {
            offset_x: 0.0,
            scroll_speed: scroll_speed.max(0.0),
            paused: false,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if self.paused || dt <= 0.0 {
            return;
        }
        self.offset_x += self.scroll_speed * dt;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// World rect to screen rect
    #[inline]
    pub fn project(&self, rect: &Rect) -> Rect {
        rect.translated(DVec2::new(-self.offset_x, 0.0))
    }

    /// Horizontal culling against a viewport starting at screen x = 0
    pub fn is_visible(&self, rect: &Rect, viewport_width: f64) -> bool {
        let screen = self.project(rect);
        screen.right() > 0.0 && screen.left() < viewport_width
    }
}
