//! Rendering capabilities
//!
//! The controller never touches the page directly. It talks to a [`Renderer`]
//! (style/transform/visibility on a handful of elements) and a
//! [`ParticleEmitter`] (the confetti library).

pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use recording::{Call, RecordingEmitter, RecordingRenderer};

use glam::Vec2;

use crate::sim::{Burst, Rect};

/// Page elements the controller drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// The glass card holding the question
    Card,
    /// "No"
    EvasiveButton,
    /// Shown after "Yes"
    CelebrationPanel,
    /// "Are you sure?" modal
    RetryPrompt,
    /// Blurred backdrop
    Background,
    /// Document body
    Document,
}

/// Style and layout operations on page elements
pub trait Renderer {
    /// Viewport size in px
    fn viewport(&self) -> Vec2;

    /// On-screen rectangle of an element
    fn measure(&self, el: Element) -> Rect;

    fn set_style(&mut self, el: Element, property: &str, value: &str);

    fn set_transform(&mut self, el: Element, transform: &str) {
        self.set_style(el, "transform", transform);
    }

    /// Take the element out of layout flow and pin it at `pos` (top-left)
    fn detach(&mut self, el: Element, pos: Vec2);

    fn show(&mut self, el: Element);

    fn hide(&mut self, el: Element);

    fn add_class(&mut self, el: Element, class: &str);

    fn remove(&mut self, el: Element);
}

/// Fire-and-forget particle effect
pub trait ParticleEmitter {
    fn emit(&mut self, burst: &Burst);
}
