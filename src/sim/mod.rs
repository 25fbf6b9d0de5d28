//! Pure interaction logic
//!
//! Nothing in here touches the page:
//! - Tilt and physics are plain functions over glam vectors
//! - Time only enters through explicit `now_ms` arguments
//! - No rendering or platform dependencies

pub mod confetti;
pub mod geometry;
pub mod physics;
pub mod state;
pub mod tilt;

pub use confetti::{Burst, ConfettiShow, Origin};
pub use geometry::Rect;
pub use physics::{Body, StepOutcome, falloff, repulsion, step, translate_css};
pub use state::{AttemptCounter, ButtonMode, PointerState};
pub use tilt::{Tilt, compute_tilt, normalize_pointer};
