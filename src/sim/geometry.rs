//! Screen-space rectangles

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Same size, different top-left
    pub fn moved_to(&self, origin: Vec2) -> Self {
        Self {
            origin,
            size: self.size,
        }
    }
}
