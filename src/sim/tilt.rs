//! 3D parallax tilt of the card
//!
//! The card leans toward the pointer: the pointer is mapped to [-1, 1] around
//! the viewport center and scaled by the tilt intensity. No smoothing; every
//! pointer event produces a fresh transform.

use glam::Vec2;

use crate::config::Config;

/// Card rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    /// Rotation around the X axis (pointer below center tips the top away)
    pub rot_x: f32,
    /// Rotation around the Y axis
    pub rot_y: f32,
}

/// Map a pointer coordinate to [-1, 1] on both axes, 0 at viewport center
pub fn normalize_pointer(pointer: Vec2, viewport: Vec2) -> Vec2 {
    let half = viewport * 0.5;
    let axis = |p: f32, h: f32| {
        if h > 0.0 {
            ((p - h) / h).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    };
    Vec2::new(axis(pointer.x, half.x), axis(pointer.y, half.y))
}

/// Rotation for a pointer position
pub fn compute_tilt(pointer: Vec2, viewport: Vec2, intensity: f32) -> Tilt {
    let n = normalize_pointer(pointer, viewport);
    // 0.0 - y keeps a centered pointer at +0 (CSS output "0deg", not "-0deg")
    Tilt {
        rot_x: (0.0 - n.y) * intensity,
        rot_y: n.x * intensity,
    }
}

impl Tilt {
    /// CSS transform for the card
    pub fn css_transform(&self, config: &Config) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale({})",
            config.tilt_perspective_px, self.rot_x, self.rot_y, config.tilt_lift_scale
        )
    }
}
