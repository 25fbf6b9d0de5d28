//! Tunable configuration
//!
//! Defaults come from [`crate::consts`]. On the web a JSON override can be
//! stored in LocalStorage to play with the feel without rebuilding.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Everything the celebration sequence needs to know
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    /// Delay between fading the No button and removing it
    pub button_remove_delay_ms: u32,
    /// Delay between the Yes click and swapping card for panel
    pub reveal_delay_ms: u32,
    /// Confetti runs this long from its first frame
    pub confetti_duration_ms: f64,
    pub particles_per_burst: u32,
    /// Burst spread (degrees)
    pub spread: f32,
    /// Emission angle of the left burst (degrees)
    pub left_angle: f32,
    /// Emission angle of the right burst (degrees)
    pub right_angle: f32,
    /// Vertical origin of both bursts (0 = top, 1 = bottom)
    pub origin_y: f32,
    pub colors: Vec<String>,
    /// CSS transition for the card exit
    pub card_transition: String,
    /// CSS transform the card animates to
    pub card_exit_transform: String,
    /// CSS filter for the background layer
    pub background_filter: String,
    /// Class added to the document body
    pub document_class: String,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            button_remove_delay_ms: BUTTON_REMOVE_DELAY_MS,
            reveal_delay_ms: REVEAL_DELAY_MS,
            confetti_duration_ms: CONFETTI_DURATION_MS,
            particles_per_burst: CONFETTI_PARTICLES,
            spread: CONFETTI_SPREAD,
            left_angle: 60.0,
            right_angle: 120.0,
            origin_y: 0.5,
            colors: vec![
                "#ff4d6d".to_string(),
                "#ffb3c1".to_string(),
                "#ffffff".to_string(),
            ],
            card_transition: "all 1s ease".to_string(),
            card_exit_transform: "scale(0.8) translateY(50px)".to_string(),
            background_filter: "blur(0px) brightness(1.1)".to_string(),
            document_class: "celebrating".to_string(),
        }
    }
}

/// Physics, tilt and prompt tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pointer distance (px) below which the No button flees
    pub repulsion_radius: f32,
    /// Impulse at zero distance
    pub repulsion_force: f32,
    /// Per-frame velocity multiplier (< 1)
    pub friction: f32,
    /// Max card rotation (degrees)
    pub tilt_intensity: f32,
    pub tilt_perspective_px: f32,
    pub tilt_lift_scale: f32,
    /// Margin kept from each viewport edge
    pub boundary_padding: f32,
    /// Fraction of velocity kept on a wall bounce
    pub wall_restitution: f32,
    /// Proximity attempts before the retry prompt appears
    pub attempt_threshold: u32,
    pub celebration: CelebrationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repulsion_radius: REPULSION_RADIUS,
            repulsion_force: REPULSION_FORCE,
            friction: FRICTION,
            tilt_intensity: TILT_INTENSITY,
            tilt_perspective_px: TILT_PERSPECTIVE_PX,
            tilt_lift_scale: TILT_LIFT_SCALE,
            boundary_padding: BOUNDARY_PADDING,
            wall_restitution: WALL_RESTITUTION,
            attempt_threshold: ATTEMPT_THRESHOLD,
            celebration: CelebrationConfig::default(),
        }
    }
}

impl Config {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "consent_card_config";

    /// Clamp values into ranges the physics can live with
    pub fn sanitized(mut self) -> Self {
        if self.repulsion_radius.is_nan() || self.repulsion_radius < 1.0 {
            log::warn!("repulsion_radius {} too small, using 1", self.repulsion_radius);
            self.repulsion_radius = 1.0;
        }
        if !(0.0..1.0).contains(&self.friction) {
            log::warn!("friction {} outside [0, 1), using default", self.friction);
            self.friction = FRICTION;
        }
        if !(0.0..=1.0).contains(&self.wall_restitution) {
            log::warn!(
                "wall_restitution {} outside [0, 1], using default",
                self.wall_restitution
            );
            self.wall_restitution = WALL_RESTITUTION;
        }
        if self.boundary_padding < 0.0 {
            self.boundary_padding = 0.0;
        }
        if self.tilt_intensity < 0.0 {
            self.tilt_intensity = -self.tilt_intensity;
        }
        if self.attempt_threshold == 0 {
            log::warn!("attempt_threshold 0, using 1");
            self.attempt_threshold = 1;
        }
        self
    }

    /// Parse a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Config>(json).map(Config::sanitized)
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config override from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring bad config override: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
