//! Session state owned by the controller

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::Body;
use crate::consts::POINTER_SENTINEL;

/// Last known pointer/touch position in viewport space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub pos: Vec2,
}

impl Default for PointerState {
    /// Far off-screen so nothing is repelled before the first move
    fn default() -> Self {
        Self {
            pos: Vec2::splat(POINTER_SENTINEL),
        }
    }
}

/// Where the No button lives
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ButtonMode {
    /// Still in normal layout flow; position comes from the page
    #[default]
    Docked,
    /// Detached and physics driven. One-way.
    Floating(Body),
    /// Removed from the page after the celebration
    Removed,
}

impl ButtonMode {
    pub fn is_detached(&self) -> bool {
        !matches!(self, ButtonMode::Docked)
    }
}

/// Proximity attempts and the retry prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttemptCounter {
    count: u32,
}

impl AttemptCounter {
    /// Register one attempt; returns the new count
    pub fn bump(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
