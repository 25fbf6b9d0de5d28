//! Interaction controller
//!
//! Owns the whole session. Input handlers and the per-frame [`tick`] mutate it
//! synchronously; the host only forwards events, drives frames and schedules
//! the one-shot [`Deferred`] actions returned by [`celebrate`].
//!
//! ```text
//! Idle --pointer within radius--> Detached --Yes--> Celebrating
//!   \___________________________Yes___________________/^
//! ```
//!
//! [`tick`]: InteractionController::tick
//! [`celebrate`]: InteractionController::celebrate

use glam::Vec2;

use crate::config::Config;
use crate::renderer::{Element, ParticleEmitter, Renderer};
use crate::sim::{
    AttemptCounter, Body, ButtonMode, ConfettiShow, PointerState, Rect, compute_tilt, step,
    translate_css,
};

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No button still in the card
    Idle,
    /// No button is loose and fleeing
    Detached,
    /// "Yes" was clicked. Terminal.
    Celebrating,
}

/// Retry prompt lifecycle (one-shot per session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptState {
    #[default]
    Pending,
    Visible,
    Dismissed,
}

/// Work the celebration schedules for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Drop the faded No button from the page
    RemoveEvasiveButton,
    /// Swap the card for the celebration panel and start confetti
    RevealCelebration,
}

/// A one-shot action to run `delay_ms` after it was returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub delay_ms: u32,
    pub action: DeferredAction,
}

pub struct InteractionController<R: Renderer, E: ParticleEmitter> {
    config: Config,
    renderer: R,
    emitter: E,
    pointer: PointerState,
    button: ButtonMode,
    attempts: AttemptCounter,
    prompt: PromptState,
    celebrating: bool,
    confetti: Option<ConfettiShow>,
    frames: u64,
}

impl<R: Renderer, E: ParticleEmitter> InteractionController<R, E> {
    pub fn new(config: Config, renderer: R, emitter: E) -> Self {
        Self {
            config,
            renderer,
            emitter,
            pointer: PointerState::default(),
            button: ButtonMode::Docked,
            attempts: AttemptCounter::default(),
            prompt: PromptState::Pending,
            celebrating: false,
            confetti: None,
            frames: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.celebrating {
            Phase::Celebrating
        } else if self.button.is_detached() {
            Phase::Detached
        } else {
            Phase::Idle
        }
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer.pos
    }

    pub fn button(&self) -> ButtonMode {
        self.button
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.count()
    }

    pub fn prompt(&self) -> PromptState {
        self.prompt
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    // === Input ===

    /// Mouse or touch moved. Records the pointer and re-tilts the card.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.pos = Vec2::new(x, y);
        if self.celebrating {
            return;
        }
        let tilt = compute_tilt(
            self.pointer.pos,
            self.renderer.viewport(),
            self.config.tilt_intensity,
        );
        let css = tilt.css_transform(&self.config);
        self.renderer.set_transform(Element::Card, &css);
    }

    /// Pointer entered (or touch started on) the No button
    pub fn on_proximity(&mut self) {
        if self.celebrating {
            return;
        }
        // Counts even after the button has fled
        let attempts = self.attempts.bump();
        log::debug!("Attempt {}", attempts);

        if attempts >= self.config.attempt_threshold && self.prompt == PromptState::Pending {
            self.renderer.show(Element::RetryPrompt);
            self.prompt = PromptState::Visible;
            log::info!("Retry prompt shown after {} attempts", attempts);
        }
    }

    /// Close button on the retry prompt
    pub fn on_dismiss_prompt(&mut self) {
        self.renderer.hide(Element::RetryPrompt);
        if self.prompt == PromptState::Visible {
            self.prompt = PromptState::Dismissed;
            log::info!("Retry prompt dismissed");
        }
    }

    // === Frame loop ===

    /// Run one animation frame. Returns false once the loop should stop.
    pub fn tick(&mut self) -> bool {
        if self.celebrating {
            return false;
        }
        self.frames += 1;

        match self.button {
            ButtonMode::Docked => self.check_trigger(),
            ButtonMode::Floating(body) => self.update_floating(body),
            ButtonMode::Removed => {}
        }
        true
    }

    /// Detach the button once the pointer gets close to it
    fn check_trigger(&mut self) {
        let rect = self.renderer.measure(Element::EvasiveButton);
        let dist = self.pointer.pos.distance(rect.center());
        if dist < self.config.repulsion_radius {
            self.detach(rect);
        }
    }

    fn detach(&mut self, rect: Rect) {
        if self.button.is_detached() {
            return;
        }
        // Pin at the measured spot so nothing jumps
        self.button = ButtonMode::Floating(Body {
            pos: rect.origin,
            vel: Vec2::ZERO,
        });
        self.renderer.detach(Element::EvasiveButton, rect.origin);
        log::info!(
            "No button detached at ({:.0}, {:.0})",
            rect.origin.x,
            rect.origin.y
        );
    }

    fn update_floating(&mut self, mut body: Body) {
        let size = self.renderer.measure(Element::EvasiveButton).size;
        let outcome = step(
            &mut body,
            size,
            self.pointer.pos,
            self.renderer.viewport(),
            &self.config,
        );
        if outcome.bounced {
            log::debug!("No button bounced at ({:.0}, {:.0})", body.pos.x, body.pos.y);
        }
        self.button = ButtonMode::Floating(body);
        self.renderer
            .set_transform(Element::EvasiveButton, &translate_css(body.pos));
    }

    // === Celebration ===

    /// "Yes" clicked. Starts the exit animation and returns the one-shot
    /// actions the host must schedule. Runs only once per session.
    pub fn celebrate(&mut self) -> Vec<Deferred> {
        if self.celebrating {
            log::warn!("Already celebrating, ignoring");
            return Vec::new();
        }
        self.celebrating = true;
        log::info!(
            "Celebrating after {} attempts and {} frames",
            self.attempts.count(),
            self.frames
        );

        let celebration = &self.config.celebration;

        if self.button != ButtonMode::Removed {
            self.renderer
                .set_style(Element::EvasiveButton, "opacity", "0");
        }

        self.renderer
            .set_style(Element::Card, "transition", &celebration.card_transition);
        self.renderer
            .set_transform(Element::Card, &celebration.card_exit_transform);
        self.renderer.set_style(Element::Card, "opacity", "0");

        self.renderer
            .set_style(Element::Background, "filter", &celebration.background_filter);
        self.renderer
            .add_class(Element::Document, &celebration.document_class);

        vec![
            Deferred {
                delay_ms: celebration.button_remove_delay_ms,
                action: DeferredAction::RemoveEvasiveButton,
            },
            Deferred {
                delay_ms: celebration.reveal_delay_ms,
                action: DeferredAction::RevealCelebration,
            },
        ]
    }

    /// Run a deferred action. Returns true when the confetti loop should start.
    pub fn fire(&mut self, action: DeferredAction) -> bool {
        if !self.celebrating {
            log::warn!("{:?} fired before celebrating, ignoring", action);
            return false;
        }
        match action {
            DeferredAction::RemoveEvasiveButton => {
                if self.button == ButtonMode::Removed {
                    log::debug!("No button already removed");
                } else {
                    self.renderer.remove(Element::EvasiveButton);
                    self.button = ButtonMode::Removed;
                }
                false
            }
            DeferredAction::RevealCelebration => {
                if self.confetti.is_some() {
                    return false;
                }
                self.renderer.show(Element::CelebrationPanel);
                self.renderer.hide(Element::Card);
                self.confetti = Some(ConfettiShow::new(&self.config.celebration));
                log::info!("Celebration revealed, confetti starting");
                true
            }
        }
    }

    /// One confetti frame. Returns false once the show is over.
    pub fn confetti_frame(&mut self, now_ms: f64) -> bool {
        let Some(show) = self.confetti.as_mut() else {
            return false;
        };
        for burst in show.frame(now_ms).into_iter().flatten() {
            self.emitter.emit(burst);
        }
        !show.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Call, RecordingEmitter, RecordingRenderer};

    type TestController = InteractionController<RecordingRenderer, RecordingEmitter>;

    fn controller() -> TestController {
        InteractionController::new(
            Config::default(),
            RecordingRenderer::new(),
            RecordingEmitter::default(),
        )
    }

    fn detach_count(c: &TestController) -> usize {
        c.renderer().count(|call| matches!(call, Call::Detach { .. }))
    }

    /// Put the pointer on the docked No button and run one frame
    fn trigger_detach(c: &mut TestController) {
        let center = c.renderer().measure(Element::EvasiveButton).center();
        c.on_pointer_move(center.x, center.y);
        c.tick();
    }

    #[test]
    fn test_starts_idle_with_offscreen_pointer() {
        let mut c = controller();
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.pointer(), Vec2::splat(-1000.0));
        for _ in 0..10 {
            assert!(c.tick());
        }
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(detach_count(&c), 0);
    }

    #[test]
    fn test_pointer_move_tilts_card() {
        let mut c = controller();
        c.on_pointer_move(640.0, 360.0);
        assert_eq!(
            c.renderer().style(Element::Card, "transform"),
            Some("perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1.02)")
        );
        c.on_pointer_move(1280.0, 360.0);
        assert_eq!(
            c.renderer().style(Element::Card, "transform"),
            Some("perspective(1000px) rotateX(0deg) rotateY(10deg) scale(1.02)")
        );
    }

    #[test]
    fn test_detaches_at_measured_position() {
        let mut c = controller();
        let rect = c.renderer().measure(Element::EvasiveButton);
        trigger_detach(&mut c);

        assert_eq!(c.phase(), Phase::Detached);
        assert_eq!(
            c.button(),
            ButtonMode::Floating(Body {
                pos: rect.origin,
                vel: Vec2::ZERO
            })
        );
        assert_eq!(
            c.renderer().calls.last(),
            Some(&Call::Detach {
                el: Element::EvasiveButton,
                pos: rect.origin
            })
        );
    }

    #[test]
    fn test_detachment_happens_once() {
        let mut c = controller();
        trigger_detach(&mut c);
        for _ in 0..60 {
            c.on_proximity();
            c.tick();
        }
        assert_eq!(detach_count(&c), 1);
        assert_eq!(c.phase(), Phase::Detached);
    }

    #[test]
    fn test_attempts_keep_counting_after_detach() {
        let mut c = controller();
        trigger_detach(&mut c);
        assert_eq!(c.phase(), Phase::Detached);
        for _ in 0..60 {
            c.on_proximity();
            c.tick();
        }
        assert_eq!(c.attempts(), 60);
        assert_eq!(c.prompt(), PromptState::Visible);
        assert!(c.renderer().is_visible(Element::RetryPrompt));
    }

    #[test]
    fn test_button_larger_than_viewport_pins_to_far_edge() {
        // 120x44 button, 20px padding: no position fits in 100x50
        let mut c = InteractionController::new(
            Config::default(),
            RecordingRenderer::new().with_viewport(Vec2::new(100.0, 50.0)),
            RecordingEmitter::default(),
        );
        trigger_detach(&mut c);
        c.tick();
        // Lower clamp first, upper clamp last: ends at viewport - size - padding
        let rect = c.renderer().measure(Element::EvasiveButton);
        assert_eq!(rect.origin, Vec2::new(-40.0, -14.0));
        let ButtonMode::Floating(body) = c.button() else {
            panic!("button should be floating");
        };
        assert!(body.vel.x <= 0.0);
    }

    #[test]
    fn test_zero_viewport_stays_finite() {
        let mut c = InteractionController::new(
            Config::default(),
            RecordingRenderer::new().with_viewport(Vec2::ZERO),
            RecordingEmitter::default(),
        );
        trigger_detach(&mut c);
        assert_eq!(
            c.renderer().style(Element::Card, "transform"),
            Some("perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1.02)")
        );
        for _ in 0..10 {
            assert!(c.tick());
        }
        let rect = c.renderer().measure(Element::EvasiveButton);
        assert_eq!(rect.origin, Vec2::new(-140.0, -64.0));
        assert!(rect.origin.is_finite());
    }

    #[test]
    fn test_floating_button_flees_and_stays_on_screen() {
        let mut c = controller();
        trigger_detach(&mut c);
        let start = c.renderer().measure(Element::EvasiveButton).center();
        let pointer = c.pointer();

        for _ in 0..120 {
            c.tick();
            let rect = c.renderer().measure(Element::EvasiveButton);
            let viewport = c.renderer().viewport;
            assert!(rect.origin.x >= 20.0 && rect.origin.x <= viewport.x - rect.size.x - 20.0);
            assert!(rect.origin.y >= 20.0 && rect.origin.y <= viewport.y - rect.size.y - 20.0);
        }
        let end = c.renderer().measure(Element::EvasiveButton).center();
        assert!(end.distance(pointer) > start.distance(pointer));
    }

    #[test]
    fn test_floating_button_settles_when_pointer_leaves() {
        let mut c = controller();
        trigger_detach(&mut c);
        for _ in 0..5 {
            c.tick();
        }
        c.on_pointer_move(-1000.0, -1000.0);
        for _ in 0..400 {
            c.tick();
        }
        let ButtonMode::Floating(body) = c.button() else {
            panic!("button should be floating");
        };
        assert!(body.vel.length() < 1e-3);
    }

    #[test]
    fn test_retry_prompt_threshold_and_dismissal() {
        let mut c = controller();
        for _ in 0..4 {
            c.on_proximity();
        }
        assert_eq!(c.prompt(), PromptState::Pending);
        assert!(!c.renderer().is_visible(Element::RetryPrompt));

        c.on_proximity();
        assert_eq!(c.prompt(), PromptState::Visible);
        assert!(c.renderer().is_visible(Element::RetryPrompt));

        // Already visible: no second show
        c.on_proximity();
        assert_eq!(c.renderer().count(|call| *call == Call::Show(Element::RetryPrompt)), 1);

        c.on_dismiss_prompt();
        assert_eq!(c.prompt(), PromptState::Dismissed);
        assert!(!c.renderer().is_visible(Element::RetryPrompt));

        c.on_proximity();
        assert!(!c.renderer().is_visible(Element::RetryPrompt));
        assert_eq!(c.attempts(), 7);
    }

    #[test]
    fn test_attempts_frozen_while_celebrating() {
        let mut c = controller();
        c.on_proximity();
        c.celebrate();
        c.on_proximity();
        assert_eq!(c.attempts(), 1);
    }

    #[test]
    fn test_celebration_is_terminal_and_idempotent() {
        let mut c = controller();
        trigger_detach(&mut c);
        c.on_pointer_move(100.0, 100.0);

        let deferred = c.celebrate();
        assert_eq!(
            deferred,
            vec![
                Deferred {
                    delay_ms: 500,
                    action: DeferredAction::RemoveEvasiveButton
                },
                Deferred {
                    delay_ms: 800,
                    action: DeferredAction::RevealCelebration
                },
            ]
        );
        assert_eq!(c.phase(), Phase::Celebrating);
        assert_eq!(c.renderer().style(Element::EvasiveButton, "opacity"), Some("0"));
        assert_eq!(c.renderer().style(Element::Card, "opacity"), Some("0"));
        assert_eq!(
            c.renderer().style(Element::Background, "filter"),
            Some("blur(0px) brightness(1.1)")
        );
        assert!(c.renderer().calls.contains(&Call::AddClass(
            Element::Document,
            "celebrating".to_string()
        )));

        let calls_after_first = c.renderer().calls.len();
        assert!(c.celebrate().is_empty());
        assert_eq!(c.renderer().calls.len(), calls_after_first);

        // Tilt and physics are frozen
        let card = c.renderer().style(Element::Card, "transform").map(str::to_string);
        c.on_pointer_move(1200.0, 700.0);
        assert!(!c.tick());
        assert_eq!(c.renderer().style(Element::Card, "transform").map(str::to_string), card);
        assert_eq!(c.renderer().calls.len(), calls_after_first);
    }

    #[test]
    fn test_evasive_button_removed_once() {
        let mut c = controller();
        c.celebrate();
        assert!(!c.fire(DeferredAction::RemoveEvasiveButton));
        assert!(!c.fire(DeferredAction::RemoveEvasiveButton));
        assert!(c.renderer().is_removed(Element::EvasiveButton));
        assert_eq!(c.renderer().count(|call| *call == Call::Remove(Element::EvasiveButton)), 1);
        assert_eq!(c.button(), ButtonMode::Removed);
    }

    #[test]
    fn test_deferred_ignored_before_celebration() {
        let mut c = controller();
        assert!(!c.fire(DeferredAction::RevealCelebration));
        assert!(!c.renderer().is_visible(Element::CelebrationPanel));
    }

    #[test]
    fn test_reveal_swaps_card_for_panel() {
        let mut c = controller();
        c.celebrate();
        assert!(c.fire(DeferredAction::RevealCelebration));
        assert!(c.renderer().is_visible(Element::CelebrationPanel));
        assert!(!c.renderer().is_visible(Element::Card));
        // Second reveal does not restart anything
        assert!(!c.fire(DeferredAction::RevealCelebration));
    }

    #[test]
    fn test_confetti_cadence() {
        let mut c = controller();
        assert!(!c.confetti_frame(0.0));

        c.celebrate();
        c.fire(DeferredAction::RevealCelebration);

        let start = 10_000.0;
        let frame_ms = 1000.0 / 60.0;
        let mut frames = 0;
        let mut now = start;
        while now - start < 5000.0 {
            let before = c.emitter().bursts.len();
            assert!(c.confetti_frame(now));
            let emitted = &c.emitter().bursts[before..];
            assert_eq!(emitted.len(), 2);
            assert_eq!(emitted[0].angle, 60.0);
            assert_eq!(emitted[0].origin.x, 0.0);
            assert_eq!(emitted[1].angle, 120.0);
            assert_eq!(emitted[1].origin.x, 1.0);
            frames += 1;
            now += frame_ms;
        }

        let total = c.emitter().bursts.len();
        assert_eq!(total, frames * 2);
        assert!(!c.confetti_frame(now));
        assert!(!c.confetti_frame(now + 1000.0));
        assert_eq!(c.emitter().bursts.len(), total);
    }
}
