//! Consent Card entry point
//!
//! On the web: wires page events, the frame loop and the celebration timers to
//! the controller. Natively: plays a scripted session headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, Document, HtmlElement, MouseEvent, TouchEvent};

    use consent_card::renderer::dom::{CanvasConfetti, DomHandles, DomRenderer};
    use consent_card::{Config, Deferred, InitError, InteractionController};

    type Controller = InteractionController<DomRenderer, CanvasConfetti>;
    type Shared = Rc<RefCell<Controller>>;

    pub fn run() -> Result<(), InitError> {
        log::info!("Consent Card starting...");

        let window = web_sys::window().ok_or(InitError::NoWindow)?;
        let document = window.document().ok_or(InitError::NoDocument)?;
        let handles = DomHandles::locate(&document)?;

        // Event targets, kept outside the renderer
        let affirmative = handles.affirmative.clone();
        let evasive = handles.evasive.clone();
        let dismiss = handles.dismiss.clone();

        let config = Config::load();
        let controller = Rc::new(RefCell::new(InteractionController::new(
            config,
            DomRenderer::new(window, handles),
            CanvasConfetti::default(),
        )));

        setup_pointer_handlers(&document, controller.clone());
        setup_attempt_handlers(&evasive, controller.clone());
        setup_dismiss_button(&dismiss, controller.clone());
        setup_affirmative_button(&affirmative, controller.clone());

        request_animation_frame(controller);

        log::info!("Consent Card running!");
        Ok(())
    }

    fn passive() -> AddEventListenerOptions {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        options
    }

    fn setup_pointer_handlers(document: &Document, controller: Shared) {
        // Mouse move
        {
            let controller = controller.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                controller
                    .borrow_mut()
                    .on_pointer_move(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (same handler, first touch only)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    controller
                        .borrow_mut()
                        .on_pointer_move(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &passive(),
            );
            closure.forget();
        }
    }

    fn setup_attempt_handlers(evasive: &HtmlElement, controller: Shared) {
        {
            let controller = controller.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                controller.borrow_mut().on_proximity();
            });
            let _ = evasive
                .add_event_listener_with_callback("mouseover", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                controller.borrow_mut().on_proximity();
            });
            let _ = evasive.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &passive(),
            );
            closure.forget();
        }
    }

    fn setup_dismiss_button(dismiss: &HtmlElement, controller: Shared) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            controller.borrow_mut().on_dismiss_prompt();
        });
        let _ = dismiss.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_affirmative_button(affirmative: &HtmlElement, controller: Shared) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let deferred = controller.borrow_mut().celebrate();
            for d in deferred {
                schedule(controller.clone(), d);
            }
        });
        let _ =
            affirmative.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One-shot timer for a celebration step
    fn schedule(controller: Shared, deferred: Deferred) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move || {
            let start_confetti = controller.borrow_mut().fire(deferred.action);
            if start_confetti {
                request_confetti_frame(controller);
            }
        });
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            deferred.delay_ms as i32,
        ) {
            log::error!("Failed to schedule {:?}: {:?}", deferred.action, e);
        }
        closure.forget();
    }

    fn request_animation_frame(controller: Shared) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(controller);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(controller: Shared) {
        let keep_running = controller.borrow_mut().tick();
        if keep_running {
            request_animation_frame(controller);
        } else {
            log::info!("Frame loop stopped");
        }
    }

    fn request_confetti_frame(controller: Shared) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            let more = controller.borrow_mut().confetti_frame(time);
            if more {
                request_confetti_frame(controller);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    if let Err(e) = wasm_app::run() {
        log::error!("Startup failed: {}", e);
        wasm_bindgen::throw_str(&e.to_string());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Consent Card (native) starting...");
    log::info!("Native mode has no page - run with `trunk serve` for the web version");

    println!("\nPlaying a headless session...");
    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Chase the No button, give up, click Yes and let the confetti run out
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use consent_card::renderer::{Element, RecordingEmitter, RecordingRenderer, Renderer};
    use consent_card::{Config, DeferredAction, InteractionController, Phase};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let mut c = InteractionController::new(
        Config::load(),
        RecordingRenderer::new(),
        RecordingEmitter::default(),
    );
    let mut now = 0.0;

    // Two seconds of chasing, an attempt every third of a second
    for frame in 0..120 {
        let target = c.renderer().measure(Element::EvasiveButton).center();
        c.on_pointer_move(target.x, target.y);
        if frame % 20 == 0 {
            c.on_proximity();
        }
        c.tick();
        now += FRAME_MS;
    }
    assert_eq!(c.phase(), Phase::Detached);
    println!(
        "✓ Button escaped: {} attempts, prompt {:?}",
        c.attempts(),
        c.prompt()
    );
    c.on_dismiss_prompt();

    let mut pending: Vec<(f64, DeferredAction)> = c
        .celebrate()
        .into_iter()
        .map(|d| (now + d.delay_ms as f64, d.action))
        .collect();
    pending.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut confetti = false;
    while !pending.is_empty() || confetti {
        now += FRAME_MS;
        while pending.first().is_some_and(|&(due, _)| due <= now) {
            let (_, action) = pending.remove(0);
            confetti |= c.fire(action);
        }
        if confetti {
            confetti = c.confetti_frame(now);
        }
    }

    assert_eq!(c.phase(), Phase::Celebrating);
    assert!(c.renderer().is_removed(Element::EvasiveButton));
    println!(
        "✓ Celebrated with {} confetti bursts",
        c.emitter().bursts.len()
    );
}
