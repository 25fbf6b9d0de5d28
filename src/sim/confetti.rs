//! Confetti cadence
//!
//! Rendering is done by an external particle library; this module only decides
//! when to fire and with what parameters.

use glam::Vec2;
use serde::Serialize;

use crate::config::CelebrationConfig;

/// One call to the particle renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Burst {
    pub particle_count: u32,
    /// Emission angle (degrees, 90 = straight up)
    pub angle: f32,
    /// Spread (degrees)
    pub spread: f32,
    /// Normalized viewport fraction, both axes in [0, 1]
    pub origin: Origin,
    pub colors: Vec<String>,
}

/// Burst origin in viewport fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for Origin {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// A running 5-second confetti show
#[derive(Debug, Clone)]
pub struct ConfettiShow {
    started_at: Option<f64>,
    duration_ms: f64,
    left: Burst,
    right: Burst,
    frames: u32,
    finished: bool,
}

impl ConfettiShow {
    pub fn new(config: &CelebrationConfig) -> Self {
        let burst = |angle: f32, origin_x: f32| Burst {
            particle_count: config.particles_per_burst,
            angle,
            spread: config.spread,
            origin: Vec2::new(origin_x, config.origin_y).into(),
            colors: config.colors.clone(),
        };
        Self {
            started_at: None,
            duration_ms: config.confetti_duration_ms,
            left: burst(config.left_angle, 0.0),
            right: burst(config.right_angle, 1.0),
            frames: 0,
            finished: false,
        }
    }

    /// Bursts to emit for the frame at `now_ms`; empty once the show is over.
    /// The clock starts on the first call.
    pub fn frame(&mut self, now_ms: f64) -> [Option<&Burst>; 2] {
        if self.finished {
            return [None, None];
        }
        let start = *self.started_at.get_or_insert(now_ms);
        if now_ms - start >= self.duration_ms {
            self.finished = true;
            log::info!("Confetti finished after {} frames", self.frames);
            return [None, None];
        }
        self.frames += 1;
        [Some(&self.left), Some(&self.right)]
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_bursts_per_frame_until_deadline() {
        let mut show = ConfettiShow::new(&CelebrationConfig::default());
        let [left, right] = show.frame(1000.0);
        let left = left.expect("left burst");
        let right = right.expect("right burst");
        assert_eq!(left.angle, 60.0);
        assert_eq!(left.origin.x, 0.0);
        assert_eq!(right.angle, 120.0);
        assert_eq!(right.origin.x, 1.0);
        assert_eq!(left.particle_count, 5);
        assert_eq!(left.spread, 55.0);

        assert!(show.frame(5999.0).iter().all(Option::is_some));
        assert!(show.frame(6000.0).iter().all(Option::is_none));
        assert!(show.is_finished());
        // Not restartable
        assert!(show.frame(6001.0).iter().all(Option::is_none));
    }

    #[test]
    fn test_burst_serializes_for_js() {
        let show = ConfettiShow::new(&CelebrationConfig::default());
        let json = serde_json::to_value(&show.left).expect("serialize");
        assert_eq!(json["particleCount"], 5);
        assert_eq!(json["origin"]["x"], 0.0);
        assert_eq!(json["colors"][0], "#ff4d6d");
    }
}
