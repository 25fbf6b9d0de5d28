//! Evasive button physics
//!
//! Unit-less Euler integration: one frame is one time step, so the feel is
//! frame-rate dependent. Each frame:
//! 1. Push away from the pointer (linear falloff inside the repulsion radius)
//! 2. Friction
//! 3. position += velocity
//! 4. Bounce off the padded viewport edges

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Position (top-left, px) and velocity (px/frame) of the floating button
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Result of one physics step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    /// Magnitude of the impulse added this frame (0 if the pointer is out of range)
    pub impulse: f32,
    /// Whether any wall was hit
    pub bounced: bool,
}

/// Repulsion falloff in [0, 1]: 1 at zero distance, 0 at (and beyond) the radius
#[inline]
pub fn falloff(distance: f32, radius: f32) -> f32 {
    if distance < radius {
        (radius - distance) / radius
    } else {
        0.0
    }
}

/// Impulse pushing a button centered at `center` away from `pointer`
pub fn repulsion(center: Vec2, pointer: Vec2, config: &Config) -> Vec2 {
    let delta = center - pointer;
    // Avoid division by zero
    let dist = delta.length().max(1.0);
    let force = falloff(dist, config.repulsion_radius);
    if force <= 0.0 {
        return Vec2::ZERO;
    }
    let angle = delta.y.atan2(delta.x);
    Vec2::from_angle(angle) * force * config.repulsion_force
}

/// Clamp one axis into [min, max], bouncing the velocity on contact
#[inline]
fn bounce_axis(pos: &mut f32, vel: &mut f32, min: f32, max: f32, restitution: f32) -> bool {
    let mut hit = false;
    if *pos < min {
        *pos = min;
        *vel *= -restitution;
        hit = true;
    }
    if *pos > max {
        *pos = max;
        *vel *= -restitution;
        hit = true;
    }
    hit
}

/// Advance the button one frame
pub fn step(body: &mut Body, size: Vec2, pointer: Vec2, viewport: Vec2, config: &Config) -> StepOutcome {
    let center = body.pos + size * 0.5;
    let push = repulsion(center, pointer, config);
    body.vel += push;

    // Friction applies every frame, push or not
    body.vel *= config.friction;

    body.pos += body.vel;

    let pad = config.boundary_padding;
    let max = viewport - size - Vec2::splat(pad);
    let bounced_x = bounce_axis(
        &mut body.pos.x,
        &mut body.vel.x,
        pad,
        max.x,
        config.wall_restitution,
    );
    let bounced_y = bounce_axis(
        &mut body.pos.y,
        &mut body.vel.y,
        pad,
        max.y,
        config.wall_restitution,
    );

    StepOutcome {
        impulse: push.length(),
        bounced: bounced_x || bounced_y,
    }
}

/// CSS transform placing the button at `pos`
pub fn translate_css(pos: Vec2) -> String {
    format!("translate({}px, {}px)", pos.x, pos.y)
}
