//! Consent Card - a Yes/No card whose "No" button refuses to be clicked
//!
//! Core modules:
//! - `sim`: Pure logic (tilt, evasive-button physics, confetti cadence)
//! - `controller`: Session state machine driven by input events and frames
//! - `renderer`: Rendering capability traits, DOM backend and a recording fake
//! - `config`: Tunable constants with optional LocalStorage overrides

pub mod config;
pub mod controller;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{CelebrationConfig, Config};
pub use controller::{Deferred, DeferredAction, InteractionController, Phase, PromptState};
pub use error::InitError;

/// Default tuning constants
pub mod consts {
    /// Pixels around the No button where repulsion kicks in
    pub const REPULSION_RADIUS: f32 = 150.0;
    /// Impulse multiplier at zero distance
    pub const REPULSION_FORCE: f32 = 15.0;
    /// Per-frame velocity decay
    pub const FRICTION: f32 = 0.9;
    /// Max card rotation in degrees
    pub const TILT_INTENSITY: f32 = 10.0;
    /// CSS perspective distance for the card tilt
    pub const TILT_PERSPECTIVE_PX: f32 = 1000.0;
    /// Uniform scale applied while tilting ("lift")
    pub const TILT_LIFT_SCALE: f32 = 1.02;
    /// Distance kept between the button and every viewport edge
    pub const BOUNDARY_PADDING: f32 = 20.0;
    /// Velocity kept (and inverted) on a wall hit
    pub const WALL_RESTITUTION: f32 = 0.8;
    /// Proximity attempts before the retry prompt shows
    pub const ATTEMPT_THRESHOLD: u32 = 5;

    /// Pointer position before any input arrives (far off-screen)
    pub const POINTER_SENTINEL: f32 = -1000.0;

    /// Delay before the faded No button is removed
    pub const BUTTON_REMOVE_DELAY_MS: u32 = 500;
    /// Delay before the celebration panel replaces the card
    pub const REVEAL_DELAY_MS: u32 = 800;
    /// How long confetti keeps firing
    pub const CONFETTI_DURATION_MS: f64 = 5000.0;
    /// Particles per burst
    pub const CONFETTI_PARTICLES: u32 = 5;
    /// Spread of each burst in degrees
    pub const CONFETTI_SPREAD: f32 = 55.0;
}
